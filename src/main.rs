//! Contact App - Main entry point
//!
//! Loads configuration, opens the contact store, and serves the web
//! application until SIGINT/SIGTERM.

use anyhow::Result;
use contact_app::repositories::{ContactRepository, SqliteContactRepository};
use contact_app::server::{self, AppState};
use contact_app::services::{ContactService, ContactServiceImpl};
use contact_app::{Config, FlashStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Configuration loaded successfully");
    info!(
        "Phone locale: {}, flash window: {} ms",
        config.phone_locale, config.flash_ttl_ms
    );

    let store = match SqliteContactRepository::connect(&config.database_url).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open contact store: {}", e);
            return Err(e.into());
        }
    };

    let repository = store.clone() as Arc<dyn ContactRepository>;
    let contacts =
        Arc::new(ContactServiceImpl::new(repository, config.phone_locale)) as Arc<dyn ContactService>;
    let state = AppState::new(
        contacts,
        FlashStore::new(config.flash_ttl()),
        config.site_owner.clone(),
    );

    let listener = TcpListener::bind(config.bind_addr()).await?;
    let served = server::serve(listener, state, server::shutdown_signal()).await;

    store.close().await;
    served?;

    info!("Contact app shutdown complete");
    Ok(())
}

//! HTTP server for the contact application.
//!
//! This module wires the page handlers into an axum router, adds the session
//! and tracing layers, and runs the listener until a shutdown signal.

pub mod handlers;

use crate::services::ContactService;
use crate::session::{session_middleware, FlashStore};
use axum::extract::Request;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Router, ServiceExt};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactService>,
    pub flash: FlashStore,
    pub site_owner: Arc<str>,
}

impl AppState {
    pub fn new(
        contacts: Arc<dyn ContactService>,
        flash: FlashStore,
        site_owner: impl Into<String>,
    ) -> Self {
        Self {
            contacts,
            flash,
            site_owner: Arc::from(site_owner.into()),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route(
            "/contact",
            get(handlers::list_contacts)
                .post(handlers::add_contact)
                .put(handlers::edit_contact)
                .delete(handlers::delete_contact),
        )
        .route("/contact/add", get(handlers::show_add_form))
        .route("/contact/edit/:name", get(handlers::show_edit_form))
        .route("/contact/:name", get(handlers::show_contact))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Method named by a `_method` query parameter, if it is one we route.
fn override_method(query: Option<&str>) -> Option<Method> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "_method")
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

/// Let HTML forms reach PUT and DELETE routes by posting to
/// `?_method=PUT` / `?_method=DELETE`.
///
/// Must wrap the router from outside: the method has to change before
/// routing picks a handler.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = override_method(request.uri().query()) {
            *request.method_mut() = method;
        }
    }
    next.run(request).await
}

/// Serve the application on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = middleware::from_fn(method_override).layer(router(state));

    if let Ok(addr) = listener.local_addr() {
        info!("Contact app is listening at http://{}", addr);
    }

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolve on SIGINT or SIGTERM (Ctrl-C elsewhere).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}

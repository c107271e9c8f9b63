//! Contact App - a server-rendered contact book.
//!
//! Lists, shows, adds, edits and deletes contacts (name, phone number,
//! email) through HTML forms, with validation and one-shot flash messages.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (ids, mobile numbers, emails)
//! - **models**: The stored contact record and the typed form payloads
//! - **repositories**: Contact storage trait and its SQLite implementation
//! - **validation**: Per-field rules with collected failures
//! - **services**: Validate-then-write orchestration
//! - **session**: Session cookie and the flash message slot
//! - **views**: HTML rendering
//! - **server**: Router, middleware and handlers
//! - **config** / **error**: Environment configuration and error types

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod session;
pub mod validation;
pub mod views;

pub use cache::TimedCache;
pub use config::Config;
pub use error::{ConfigError, StoreError, SubmitError};
pub use models::{Contact, ContactFields};
pub use repositories::{ContactRepository, SqliteContactRepository};
pub use server::AppState;
pub use services::{ContactService, ContactServiceImpl};
pub use session::{FlashStore, SessionId};
pub use validation::{FieldError, ValidationErrors};

//! Error types for the contact application.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors that can occur when talking to the contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be reached or the query failed
    #[error("Contact store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A required field was empty on write
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Another contact already uses this name
    #[error("Duplicate contact name: {0}")]
    DuplicateName(String),

    /// A stored row could not be turned back into a contact
    #[error("Corrupt contact record: {0}")]
    CorruptRecord(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Outcome of a rejected or failed form submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// One or more validation rules failed; nothing was written
    #[error("Submission rejected: {0}")]
    Rejected(ValidationErrors),

    /// The store failed while validating or writing
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SubmitError
pub type SubmitResult<T> = Result<T, SubmitError>;

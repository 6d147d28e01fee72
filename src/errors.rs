//! Unified error type for the staffing desk.
//!
//! Every fallible function in the crate returns [`Result`]. The HTTP layer maps
//! variants to status codes in `api::error`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Timesheet not found: {id}")]
    TimesheetNotFound { id: Uuid },

    #[error("Job posting not found: {id}")]
    JobNotFound { id: i64 },

    #[error("A practice email is required before an invoice can be sent")]
    MissingRecipient,

    #[error("Notification failed: {message}")]
    Notification { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

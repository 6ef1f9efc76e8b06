//! Error types used throughout the client

use thiserror::Error;

/// Main error type for the Brighte API client
///
/// Resource clients swallow most upstream failures (logging a warning and
/// returning `None` or an empty list); the variants here cover the flows
/// that deliberately surface errors to the caller: authentication, transport
/// failures, and the promotion application flow.
#[derive(Error, Debug)]
pub enum BrighteError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream rejected the request as invalid; carries the validation
    /// errors exactly as returned by the service.
    #[error("Bad request: {errors}")]
    BadRequest { errors: serde_json::Value },

    #[error("Record not found")]
    NotFound,

    #[error("Promotion error: {0}")]
    Promotion(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Brighte API operations
pub type Result<T> = std::result::Result<T, BrighteError>;

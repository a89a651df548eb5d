//! Result and error types for the core library
//!
//! Errors are split into fatal conditions that abort the run (setup and
//! authentication failures) and soft conditions that services degrade to
//! empty data plus a warning. Policy lives in the caller; `is_fatal` only
//! classifies.

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Authentication rejected: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{endpoint} returned HTTP {status}")]
    Api { endpoint: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a signing error
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create an authentication-rejection error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an API status error
    pub fn api(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Whether this error must abort the run.
    ///
    /// Non-200 data responses and unparseable bodies are soft: callers
    /// continue with empty data and record a warning.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Api { .. } | Self::Json(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

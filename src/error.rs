//! # Error Types
//!
//! Custom error types for the HoTT responder using `thiserror`.
//!
//! Malformed polls are never errors: the listener drops them silently and the
//! receiver re-polls. These variants cover the surrounding plumbing only.

use thiserror::Error;

/// Main error type for the HoTT responder
#[derive(Debug, Error)]
pub enum HottError {
    /// Serial port errors
    #[error("Serial port error: {0}")]
    Serial(String),

    /// None of the candidate serial devices could be opened
    #[error("No serial device found (tried: {0})")]
    SerialPortNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Packet log serialization errors
    #[error("Packet log error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the HoTT responder
pub type Result<T> = std::result::Result<T, HottError>;

//! Error types for the traffic light
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TrafficLightError
pub type Result<T> = std::result::Result<T, TrafficLightError>;

/// Unified error type for traffic light operations
#[derive(Debug, Error)]
pub enum TrafficLightError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Request Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value `{value}' for property `{field}'")]
    InvalidValue { field: &'static str, value: String },

    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Cannot find {color} pin #{index} `{name}' in beagle bone black pins `{valid}'")]
    InvalidPin {
        color: &'static str,
        index: usize,
        name: String,
        valid: String,
    },

    #[error("Pin error: {0}")]
    Pin(String),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Received unexpected HTTP status code `{0}'")]
    UnexpectedStatus(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    #[error("Server error: {0}")]
    Server(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

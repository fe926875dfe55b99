//! Gateway construction errors.
//!
//! Operation failures use [`cro_core::ReportError`]; this type only covers
//! building a gateway from configuration.

use thiserror::Error;

/// Errors that can occur while selecting and building a gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] cro_config::ConfigError),

    /// The HTTP client could not be built (TLS backend, invalid header).
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

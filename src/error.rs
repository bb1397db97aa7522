//! Application error types.

use thiserror::Error;

use crate::models::ValidationError;

/// Application-level errors for CodeOrbit.
#[derive(Error, Debug)]
pub enum AppError {
    // Ingestion errors
    #[error("Graph rejected: {0}")]
    Integrity(#[from] ValidationError),

    #[error("Could not read graph payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Appearance errors
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("Settings storage error: {0}")]
    Settings(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Graph producer disconnected before delivering a graph")]
    ProducerGone,
}

//! Error types for schema inference and validation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabwatchError {
    /// Malformed schema input (wrong container type, bad key/value shape)
    #[error("Invalid schema input: {0}")]
    Validation(String),

    /// Features and additional data must be disjoint namespaces
    #[error("features and additional_data must contain different keys, found shared keys: {keys:?}")]
    Conflict { keys: Vec<String> },

    /// Disallowed type tag or value shape in a schema mapping
    #[error("Invalid schema value: {0}")]
    Schema(String),

    /// Unsupported timestamp format or input type
    #[error("Not supported timestamp format: {0}")]
    InvalidTimestamp(String),

    /// Unsupported frequency literal
    #[error("Unsupported value of frequency: {0}")]
    UnsupportedFrequency(String),

    /// Unexpected HTTP status from the monitoring service
    #[error("{0}")]
    Transport(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TabwatchError>;

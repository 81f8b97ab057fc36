//! Error types for reference-data operations.
//!
//! Provides a unified error type covering transport, status, decoding,
//! configuration and equipment-description failures.

use monster_fighter_equipment::EquipmentChoiceError;
use thiserror::Error;

/// Errors that can occur while fetching or interpreting reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// Transport-level HTTP failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    StatusError { url: String, status: u16 },

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A document lacks a field the sheet builder needs.
    #[error("missing field '{field}' in {context}")]
    MissingField { context: String, field: &'static str },

    /// A starting-equipment description could not be decoded.
    #[error("equipment description error: {0}")]
    EquipmentError(#[from] EquipmentChoiceError),

    /// The monster sample was empty, so no average exists.
    #[error("no monsters available to sample")]
    EmptySample,

    /// Configuration values are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`ReferenceError`].
pub type Result<T> = std::result::Result<T, ReferenceError>;

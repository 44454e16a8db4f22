//! Error types for the mapsmith core model

use thiserror::Error;

/// Result type alias for core model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for core model operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid type identifier '{input}': {message}")]
    InvalidTypeIdentifier { input: String, message: String },

    #[error("Definition for '{0}' has neither a serializer nor a deserializer")]
    EmptyDefinition(String),

    #[error("JSON value cannot be represented as a universal value: {0}")]
    UnrepresentableJson(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

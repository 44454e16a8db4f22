//! Error types shared by the mapsmith front ends

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] mapsmith_core::Error),

    #[error(transparent)]
    Resolver(#[from] mapsmith_resolver::ResolverError),

    #[error("type '{type_name}' is declared more than once in the universe")]
    DuplicateType { type_name: String },

    #[error("no {direction} known for type '{type_name}'")]
    MissingDefinition { type_name: String, direction: &'static str },

    #[error("cannot map {found} as '{type_name}': expected {expected}")]
    UnexpectedShape {
        type_name: String,
        expected: &'static str,
        found: String,
    },

    #[error("instance of '{type_name}' has no field '{field}'")]
    MissingField { type_name: String, field: String },

    #[error("'{value}' is not a known subtype of '{type_name}'")]
    UnknownSubtype { type_name: String, value: String },

    #[error("'{value}' is not a constant of enum '{type_name}'")]
    UnknownConstant { type_name: String, value: String },

    #[error("no value injected for type '{0}'")]
    MissingInjection(String),
}

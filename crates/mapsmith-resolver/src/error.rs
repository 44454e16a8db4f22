//! Error types for the resolver

use crate::introspection::IntrospectionError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Errors that abort resolution or summarize its failures
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    /// Aggregated message for every type that could not be mapped
    #[error("{0}")]
    Undetectable(String),

    #[error(transparent)]
    Core(#[from] mapsmith_core::Error),
}

/// Why a single type ended up undetectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedType,
    NoCandidates,
    AmbiguousCandidates,
    AsymmetricDuplex,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::UnsupportedType => "unsupported type",
            Self::NoCandidates => "no candidates",
            Self::AmbiguousCandidates => "ambiguous candidates",
            Self::AsymmetricDuplex => "asymmetric duplex",
        };
        write!(f, "{}", text)
    }
}

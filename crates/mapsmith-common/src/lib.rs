//! Shared plumbing around the mapsmith resolver: configuration, type universe
//! descriptors, the universal mapper and wire marshallers.

pub mod config;
pub mod error;
pub mod mapper;
pub mod marshal;
pub mod universe;

pub use error::{CommonError, Result};

//! Core model for mapsmith.
//!
//! Everything the resolver reasons about lives here: type identifiers,
//! serializer/deserializer candidates, reasons and requirements, resolved
//! definitions and the `Universal` value tree exchanged with wire codecs.

pub mod candidate;
pub mod definition;
pub mod error;
pub mod naming;
pub mod reason;
pub mod requirements;
pub mod universal;

pub use candidate::{Deserializer, Serializer};
pub use definition::Definition;
pub use error::{Error, Result};
pub use naming::{PrimitiveKind, RealType, TypeIdentifier};
pub use reason::Reason;
pub use requirements::{
    DetectionRequirementReasons, DetectionRequirements, Direction, RequirementKind, RequirementsChange,
};
pub use universal::Universal;

pub mod primitive;
pub mod type_identifier;

pub use primitive::PrimitiveKind;
pub use type_identifier::{RealType, TypeIdentifier};

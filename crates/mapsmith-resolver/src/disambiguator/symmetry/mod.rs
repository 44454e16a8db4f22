//! Symmetry between serializers and deserializers.
//!
//! A duplex type round-trips only when what is written can be read back. For
//! custom primitives that means a shared base kind; for serialized objects it
//! means the serializer's fields cover a deserializer's parameters exactly.

pub mod builder;
pub mod combinations;
pub mod equivalence;
pub mod primitive;

pub use builder::SymmetryBuilder;
pub use equivalence::{EquivalenceClass, EquivalenceSignature};

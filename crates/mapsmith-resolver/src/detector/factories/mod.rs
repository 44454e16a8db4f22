//! Ordered candidate factories.

mod builtin;
mod collection;
mod custom_primitive;
mod enums;
mod maps;
mod polymorphic;
mod serialized_object;

pub use builtin::BuiltInPrimitiveFactory;
pub use collection::CollectionFactory;
pub use custom_primitive::CustomPrimitiveFactory;
pub use enums::EnumFactory;
pub use maps::MapFactory;
pub use polymorphic::PolymorphicFactory;
pub use serialized_object::SerializedObjectFactory;

use crate::context::ResolutionContext;
use crate::introspection::{TypeDescription, TypeKind};
use mapsmith_core::{Deserializer, Serializer, TypeIdentifier};

/// The type being analyzed, with its description when it was introspected.
pub struct Subject<'a> {
    pub identifier: &'a TypeIdentifier,
    pub description: Option<&'a TypeDescription>,
}

impl Subject<'_> {
    /// Description of a plain class, if the subject is one.
    pub fn class_description(&self) -> Option<&TypeDescription> {
        self.description
            .filter(|description| matches!(description.kind, TypeKind::Class))
    }
}

/// Produces candidates of one kind for a subject.
pub trait DetectionFactory: Send + Sync {
    fn name(&self) -> &'static str;

    fn serializers(&self, subject: &Subject<'_>, context: &ResolutionContext) -> Vec<Serializer>;

    fn deserializers(&self, subject: &Subject<'_>, context: &ResolutionContext) -> Vec<Deserializer>;
}

pub fn default_factories() -> Vec<Box<dyn DetectionFactory>> {
    vec![
        Box::new(BuiltInPrimitiveFactory),
        Box::new(CollectionFactory),
        Box::new(MapFactory),
        Box::new(PolymorphicFactory),
        Box::new(EnumFactory),
        Box::new(CustomPrimitiveFactory),
        Box::new(SerializedObjectFactory),
    ]
}

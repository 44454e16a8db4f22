use super::Instance;
use indexmap::IndexMap;
use mapsmith_core::TypeIdentifier;

/// Supplies values for injected types during deserialization.
#[derive(Debug, Clone, Default)]
pub struct Injector {
    values: IndexMap<TypeIdentifier, Instance>,
}

impl Injector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ty: TypeIdentifier, value: Instance) -> Self {
        self.values.insert(ty, value);
        self
    }

    pub fn value_for(&self, ty: &TypeIdentifier) -> Option<&Instance> {
        self.values.get(ty)
    }
}

use mapsmith_core::TypeIdentifier;

/// Settings shared by detection and disambiguation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Static factory names preferred for custom primitive deserialization.
    pub custom_primitive_factory_names: Vec<String>,
    /// Instance methods that serialize a custom primitive. The first one is preferred.
    pub custom_primitive_serializer_names: Vec<String>,
    /// Static factory names preferred for serialized object deserialization.
    pub serialized_object_factory_names: Vec<String>,
    /// Discriminator entry written for polymorphic types.
    pub type_identifier_key: String,
    /// Types supplied by an injector instead of being read from input.
    pub injected_types: Vec<TypeIdentifier>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self {
            custom_primitive_factory_names: vec!["fromString".into(), "of".into(), "valueOf".into()],
            custom_primitive_serializer_names: vec!["stringValue".into(), "internalValueForMapping".into()],
            serialized_object_factory_names: vec!["deserialize".into()],
            type_identifier_key: "type".into(),
            injected_types: Vec::new(),
        }
    }
}

impl ResolutionContext {
    pub fn is_injected(&self, ty: &TypeIdentifier) -> bool {
        self.injected_types.contains(ty)
    }

    pub fn with_injected(mut self, ty: TypeIdentifier) -> Self {
        if !self.injected_types.contains(&ty) {
            self.injected_types.push(ty);
        }
        self
    }

    pub fn is_custom_primitive_serializer_name(&self, name: &str) -> bool {
        self.custom_primitive_serializer_names.iter().any(|n| n == name)
    }

    pub fn preferred_custom_primitive_serializer_name(&self) -> Option<&str> {
        self.custom_primitive_serializer_names.first().map(String::as_str)
    }

    pub fn is_preferred_custom_primitive_factory(&self, name: &str) -> bool {
        self.custom_primitive_factory_names.iter().any(|n| n == name)
    }

    pub fn is_preferred_serialized_object_factory(&self, name: &str) -> bool {
        self.serialized_object_factory_names.iter().any(|n| n == name)
    }
}

use crate::disambiguator::fields::SerializationFieldInstantiation;
use mapsmith_core::{Deserializer, TypeIdentifier};
use std::collections::BTreeMap;

/// Field names and types a deserializer can be called with.
pub type EquivalenceSignature = BTreeMap<String, TypeIdentifier>;

pub fn describe_signature(signature: &EquivalenceSignature) -> String {
    let fields: Vec<String> = signature
        .iter()
        .map(|(name, ty)| format!("{}: {}", name, ty.description()))
        .collect();
    format!("[{}]", fields.join(", "))
}

/// Deserializers sharing one signature, and the serialization fields matching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    signature: EquivalenceSignature,
    deserializers: Vec<Deserializer>,
    serialization_fields: Option<SerializationFieldInstantiation>,
}

impl EquivalenceClass {
    pub fn new(signature: EquivalenceSignature) -> Self {
        Self {
            signature,
            deserializers: Vec::new(),
            serialization_fields: None,
        }
    }

    pub fn signature(&self) -> &EquivalenceSignature {
        &self.signature
    }

    pub fn add_deserializer(&mut self, deserializer: Deserializer) {
        if !self.deserializers.contains(&deserializer) {
            self.deserializers.push(deserializer);
        }
    }

    pub fn set_serialization_fields(&mut self, fields: SerializationFieldInstantiation) {
        assert!(
            self.serialization_fields.is_none(),
            "serialized fields can only be set once"
        );
        self.serialization_fields = Some(fields);
    }

    pub fn size(&self) -> usize {
        self.signature.len()
    }

    /// Both directions are covered.
    pub fn is_fully_supported(&self) -> bool {
        self.serialization_fields.is_some() && !self.deserializers.is_empty()
    }

    pub fn into_parts(self) -> (Option<SerializationFieldInstantiation>, Vec<Deserializer>) {
        (self.serialization_fields, self.deserializers)
    }

    pub fn describe(&self) -> String {
        let fields = self
            .serialization_fields
            .as_ref()
            .map(SerializationFieldInstantiation::describe)
            .unwrap_or_default();
        let deserializers: Vec<String> = self
            .deserializers
            .iter()
            .map(|d| format!("\t- {}", d.description()))
            .collect();
        format!("fields:\n{}\ndeserializers:\n{}", fields, deserializers.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disambiguator::fields::SerializationFieldOptions;

    #[test]
    #[should_panic(expected = "serialized fields can only be set once")]
    fn test_serialization_fields_are_set_once() {
        let mut class = EquivalenceClass::new(EquivalenceSignature::new());
        let fields = SerializationFieldOptions::default().instantiate_all();
        class.set_serialization_fields(fields.clone());
        class.set_serialization_fields(fields);
    }

    #[test]
    fn test_signature_description() {
        let mut signature = EquivalenceSignature::new();
        signature.insert("b".into(), TypeIdentifier::class("int"));
        signature.insert("a".into(), TypeIdentifier::class("String"));
        assert_eq!(describe_signature(&signature), "[a: String, b: int]");
    }
}

//! Serialization field options and their instantiation against a field set.

use crate::diagnostics::ScanLedger;
use indexmap::IndexMap;
use mapsmith_core::candidate::{mirrors, SerializationField, SerializedObjectSerializer};
use mapsmith_core::TypeIdentifier;
use std::collections::BTreeMap;

/// Every accessor found for each field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationFieldOptions {
    options: IndexMap<String, Vec<SerializationField>>,
}

impl SerializationFieldOptions {
    pub fn add(&mut self, field: SerializationField) {
        let entry = self.options.entry(field.name.clone()).or_default();
        if !entry.contains(&field) {
            entry.push(field);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &SerializationField> {
        self.options.values().flatten()
    }

    /// Every name with every option, for serialization-only detection.
    pub fn instantiate_all(&self) -> SerializationFieldInstantiation {
        SerializationFieldInstantiation {
            fields: self.options.clone(),
        }
    }

    /// Options covering exactly `fields`, with mirroring types.
    ///
    /// Names in the options but not in `fields` are left out.
    pub fn instantiate(
        &self,
        fields: &BTreeMap<String, TypeIdentifier>,
    ) -> Result<SerializationFieldInstantiation, Vec<String>> {
        let mut problems = Vec::new();
        for (name, ty) in fields {
            match self.options.get(name) {
                None => problems.push(format!("No field under the name '{}'", name)),
                Some(options) if !options.iter().any(|o| mirrors(&o.field_type, ty)) => problems.push(format!(
                    "No field under name '{}' of a type similar to '{}'",
                    name,
                    ty.description()
                )),
                Some(_) => {}
            }
        }
        if !problems.is_empty() {
            return Err(problems);
        }
        let instantiated = self
            .options
            .iter()
            .filter_map(|(name, options)| {
                let ty = fields.get(name)?;
                let mirrored: Vec<SerializationField> = options
                    .iter()
                    .filter(|o| mirrors(&o.field_type, ty))
                    .cloned()
                    .collect();
                Some((name.clone(), mirrored))
            })
            .collect();
        Ok(SerializationFieldInstantiation { fields: instantiated })
    }
}

/// Field options narrowed to one field set, still possibly several accessors per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationFieldInstantiation {
    fields: IndexMap<String, Vec<SerializationField>>,
}

impl SerializationFieldInstantiation {
    /// Chooses one accessor per name, preferring public fields.
    pub fn instantiate(&self, ledger: &mut ScanLedger) -> Result<SerializedObjectSerializer, Vec<String>> {
        let mut chosen = Vec::with_capacity(self.fields.len());
        let mut problems = Vec::new();
        for options in self.fields.values() {
            let preferred: Vec<&SerializationField> = {
                let public: Vec<&SerializationField> = options.iter().filter(|f| f.is_public_field()).collect();
                if public.is_empty() || public.len() == options.len() {
                    options.iter().collect()
                } else {
                    for dropped in options.iter().filter(|f| !f.is_public_field()) {
                        ledger.strike_serialization_field(dropped, "less priority than a public field");
                    }
                    public
                }
            };
            match preferred.as_slice() {
                [only] => chosen.push((*only).clone()),
                _ => {
                    let described: Vec<String> = preferred.iter().map(|f| f.describe()).collect();
                    problems.push(format!("cannot decide between [{}]", described.join(", ")));
                }
            }
        }
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(SerializedObjectSerializer::new(chosen))
    }

    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(|(name, options)| {
                let described: Vec<String> = options.iter().map(|f| f.describe()).collect();
                format!("\t- '{}' with query options '[{}]'", name, described.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

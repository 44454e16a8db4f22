use super::combinations::all_combinations;
use super::equivalence::{describe_signature, EquivalenceClass, EquivalenceSignature};
use crate::context::ResolutionContext;
use crate::detector::{DetectionFailure, DetectionResult};
use crate::disambiguator::fields::SerializationFieldOptions;
use crate::error::ErrorKind;
use indexmap::IndexMap;
use mapsmith_core::{Deserializer, TypeIdentifier};

const SEPARATOR: &str = "\n-------------\n";

/// Groups object deserializers by signature and matches the serialization fields against each.
///
/// Injected parameters are optional: a deserializer taking one contributes a
/// signature with and one without it.
pub struct SymmetryBuilder<'c> {
    context: &'c ResolutionContext,
    classes: IndexMap<EquivalenceSignature, EquivalenceClass>,
    attempts: usize,
    mismatches: Vec<String>,
}

impl<'c> SymmetryBuilder<'c> {
    pub fn new(context: &'c ResolutionContext) -> Self {
        Self {
            context,
            classes: IndexMap::new(),
            attempts: 0,
            mismatches: Vec::new(),
        }
    }

    pub fn add_deserializer(&mut self, deserializer: &Deserializer) {
        let Deserializer::SerializedObject(object) = deserializer else {
            return;
        };
        let mut required = EquivalenceSignature::new();
        let mut optional: Vec<(String, TypeIdentifier)> = Vec::new();
        for (name, ty) in &object.fields {
            if self.context.is_injected(ty) {
                optional.push((name.clone(), ty.clone()));
            } else {
                required.insert(name.clone(), ty.clone());
            }
        }
        for signature in all_combinations(&required, &optional) {
            self.classes
                .entry(signature.clone())
                .or_insert_with(|| EquivalenceClass::new(signature))
                .add_deserializer(deserializer.clone());
        }
    }

    pub fn add_serializer(&mut self, options: &SerializationFieldOptions) {
        for (signature, class) in self.classes.iter_mut() {
            self.attempts += 1;
            match options.instantiate(signature) {
                Ok(instantiation) => class.set_serialization_fields(instantiation),
                Err(problems) => self
                    .mismatches
                    .push(format!("{}: {}", describe_signature(signature), problems.join(", "))),
            }
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn classes(&self) -> impl Iterator<Item = &EquivalenceClass> {
        self.classes.values()
    }

    /// The fully supported class with the largest signature.
    pub fn determine(self) -> DetectionResult<EquivalenceClass> {
        let mut supported: Vec<EquivalenceClass> = self
            .classes
            .into_values()
            .filter(EquivalenceClass::is_fully_supported)
            .collect();
        supported.sort_by(|a, b| b.size().cmp(&a.size()));

        let Some(largest) = supported.first().map(EquivalenceClass::size) else {
            let mismatches: String = self.mismatches.iter().map(|m| format!("\n\t- {}", m)).collect();
            return Err(DetectionFailure::new(
                ErrorKind::AsymmetricDuplex,
                format!("no symmetric result{}", mismatches),
            ));
        };
        let mut tied: Vec<EquivalenceClass> = supported.into_iter().filter(|c| c.size() == largest).collect();
        if tied.len() > 1 {
            let described: Vec<String> = tied.iter().map(EquivalenceClass::describe).collect();
            return Err(DetectionFailure::new(
                ErrorKind::AmbiguousCandidates,
                format!(
                    "ambiguous options as serialized object:\n{}{}{}",
                    SEPARATOR,
                    described.join(SEPARATOR),
                    SEPARATOR
                ),
            ));
        }
        tied.pop().ok_or_else(|| DetectionFailure::new(ErrorKind::AsymmetricDuplex, "no symmetric result"))
    }
}

//! Scan ledger and the scan information built from it.
//!
//! The ledger records every candidate detection considered for a type together
//! with the reasons it was struck. It is rebuilt on every detection run and
//! frozen into a [`ScanInformation`] on request.

use mapsmith_core::candidate::SerializationField;
use mapsmith_core::{Deserializer, DetectionRequirements, Reason, Serializer, TypeIdentifier};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Considered<T> {
    pub candidate: T,
    pub strikes: Vec<String>,
}

impl<T> Considered<T> {
    fn strike(&mut self, reason: &str) {
        if !self.strikes.iter().any(|s| s == reason) {
            self.strikes.push(reason.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanLedger {
    serializers: Vec<Considered<Serializer>>,
    deserializers: Vec<Considered<Deserializer>>,
    serialization_fields: Vec<Considered<SerializationField>>,
}

fn add<T: PartialEq + Clone>(entries: &mut Vec<Considered<T>>, candidate: &T) {
    if !entries.iter().any(|e| &e.candidate == candidate) {
        entries.push(Considered {
            candidate: candidate.clone(),
            strikes: Vec::new(),
        });
    }
}

fn strike<T: PartialEq>(entries: &mut [Considered<T>], candidate: &T, reason: &str) {
    if let Some(entry) = entries.iter_mut().find(|e| &e.candidate == candidate) {
        entry.strike(reason);
    }
}

fn strike_others<T: PartialEq>(entries: &mut [Considered<T>], winner: &T, reason: &str) {
    entries
        .iter_mut()
        .filter(|e| &e.candidate != winner)
        .for_each(|e| e.strike(reason));
}

impl ScanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every candidate of a previous detection run.
    pub fn reset(&mut self) {
        self.serializers.clear();
        self.deserializers.clear();
        self.serialization_fields.clear();
    }

    pub fn add_serializer(&mut self, serializer: &Serializer) {
        add(&mut self.serializers, serializer);
    }

    pub fn add_deserializer(&mut self, deserializer: &Deserializer) {
        add(&mut self.deserializers, deserializer);
    }

    pub fn add_serialization_field(&mut self, field: &SerializationField) {
        add(&mut self.serialization_fields, field);
    }

    pub fn strike_serializer(&mut self, serializer: &Serializer, reason: &str) {
        strike(&mut self.serializers, serializer, reason);
    }

    pub fn strike_deserializer(&mut self, deserializer: &Deserializer, reason: &str) {
        strike(&mut self.deserializers, deserializer, reason);
    }

    pub fn strike_serialization_field(&mut self, field: &SerializationField, reason: &str) {
        strike(&mut self.serialization_fields, field, reason);
    }

    pub fn strike_other_serializers(&mut self, winner: &Serializer, reason: &str) {
        strike_others(&mut self.serializers, winner, reason);
    }

    pub fn strike_other_deserializers(&mut self, winner: &Deserializer, reason: &str) {
        strike_others(&mut self.deserializers, winner, reason);
    }

    /// Strikes every serialization field that is not part of `kept`.
    pub fn strike_other_serialization_fields(&mut self, kept: &[SerializationField], reason: &str) {
        self.serialization_fields
            .iter_mut()
            .filter(|e| !kept.contains(&e.candidate))
            .for_each(|e| e.strike(reason));
    }

    pub fn serializers(&self) -> &[Considered<Serializer>] {
        &self.serializers
    }

    pub fn deserializers(&self) -> &[Considered<Deserializer>] {
        &self.deserializers
    }

    pub fn serialization_fields(&self) -> &[Considered<SerializationField>] {
        &self.serialization_fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_because: Vec<String>,
}

impl CandidateReport {
    fn from_entries<T>(entries: &[Considered<T>], describe: impl Fn(&T) -> String) -> Vec<Self> {
        entries
            .iter()
            .map(|e| Self {
                description: describe(&e.candidate),
                ignored_because: e.strikes.clone(),
            })
            .collect()
    }
}

/// Frozen diagnostics for one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanInformation {
    #[serde(rename = "type")]
    pub type_identifier: TypeIdentifier,
    pub state: String,
    pub requirements: DetectionRequirements,
    pub serialization_reasons: Vec<String>,
    pub deserialization_reasons: Vec<String>,
    pub serializer: Option<String>,
    pub deserializer: Option<String>,
    pub failure: Option<String>,
    pub serializers: Vec<CandidateReport>,
    pub deserializers: Vec<CandidateReport>,
    pub serialization_fields: Vec<CandidateReport>,
}

/// Parts of a type's state that go into its scan information.
pub struct ScanSnapshot<'a> {
    pub type_identifier: &'a TypeIdentifier,
    pub state: String,
    pub requirements: DetectionRequirements,
    pub serialization_reasons: Vec<String>,
    pub deserialization_reasons: Vec<String>,
    pub serializer: Option<&'a Serializer>,
    pub deserializer: Option<&'a Deserializer>,
    pub failure: Option<String>,
    pub ledger: &'a ScanLedger,
}

impl ScanInformation {
    pub fn from_snapshot(snapshot: ScanSnapshot<'_>) -> Self {
        let ledger = snapshot.ledger;
        Self {
            type_identifier: snapshot.type_identifier.clone(),
            state: snapshot.state,
            requirements: snapshot.requirements,
            serialization_reasons: snapshot.serialization_reasons,
            deserialization_reasons: snapshot.deserialization_reasons,
            serializer: snapshot.serializer.map(Serializer::description),
            deserializer: snapshot.deserializer.map(Deserializer::description),
            failure: snapshot.failure,
            serializers: CandidateReport::from_entries(ledger.serializers(), Serializer::description),
            deserializers: CandidateReport::from_entries(ledger.deserializers(), Deserializer::description),
            serialization_fields: CandidateReport::from_entries(
                ledger.serialization_fields(),
                SerializationField::describe,
            ),
        }
    }
}

/// Renders each reason chain as a `\t- ` line.
pub fn dump_reasons(
    owner: &TypeIdentifier,
    reasons: &[Reason],
    reasons_for: &dyn Fn(&TypeIdentifier) -> Vec<Reason>,
) -> Vec<String> {
    reasons
        .iter()
        .flat_map(|reason| reason.render(owner, reasons_for))
        .collect()
}

fn write_candidates(f: &mut fmt::Formatter<'_>, title: &str, reports: &[CandidateReport]) -> fmt::Result {
    if reports.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}:", title)?;
    for report in reports {
        writeln!(f, "\t- {}", report.description.replace('\n', "\n\t  "))?;
        for strike in &report.ignored_because {
            writeln!(f, "\t    ignored because {}", strike)?;
        }
    }
    Ok(())
}

impl fmt::Display for ScanInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}] ({})",
            self.type_identifier.description(),
            self.state,
            self.requirements
        )?;
        if !self.serialization_reasons.is_empty() {
            writeln!(f, "Serialization reasons:")?;
            for line in &self.serialization_reasons {
                writeln!(f, "\t- {}", line)?;
            }
        }
        if !self.deserialization_reasons.is_empty() {
            writeln!(f, "Deserialization reasons:")?;
            for line in &self.deserialization_reasons {
                writeln!(f, "\t- {}", line)?;
            }
        }
        if let Some(serializer) = &self.serializer {
            writeln!(f, "Serializer: {}", serializer)?;
        }
        if let Some(deserializer) = &self.deserializer {
            writeln!(f, "Deserializer: {}", deserializer)?;
        }
        if let Some(failure) = &self.failure {
            writeln!(f, "Failure: {}", failure)?;
        }
        write_candidates(f, "Considered serializers", &self.serializers)?;
        write_candidates(f, "Considered serialization fields", &self.serialization_fields)?;
        write_candidates(f, "Considered deserializers", &self.deserializers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsmith_core::PrimitiveKind;
    use mapsmith_core::candidate::CustomPrimitiveSerializer;

    #[test]
    fn test_strikes_are_recorded_once() {
        let mut ledger = ScanLedger::new();
        let a = Serializer::CustomPrimitive(CustomPrimitiveSerializer::method(PrimitiveKind::String, "stringValue"));
        let b = Serializer::CustomPrimitive(CustomPrimitiveSerializer::method(PrimitiveKind::Int, "intValue"));
        ledger.add_serializer(&a);
        ledger.add_serializer(&b);
        ledger.add_serializer(&a);
        ledger.strike_other_serializers(&a, "less priority");
        ledger.strike_other_serializers(&a, "less priority");

        assert_eq!(ledger.serializers().len(), 2);
        assert!(ledger.serializers()[0].strikes.is_empty());
        assert_eq!(ledger.serializers()[1].strikes, vec!["less priority"]);
    }

    #[test]
    fn test_reset_forgets_candidates() {
        let mut ledger = ScanLedger::new();
        ledger.add_serialization_field(&SerializationField::public_field("a", TypeIdentifier::class("String")));
        ledger.reset();
        assert!(ledger.serialization_fields().is_empty());
    }
}

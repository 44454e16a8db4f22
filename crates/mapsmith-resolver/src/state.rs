//! Per-type detection state machine.
//!
//! ```text
//! Unreasoned -> ToBeDetected -> Resolving -> Resolved
//!                            \-> Undetectable
//! ```
//!
//! Any state falls back to `Unreasoned` when its last reason is removed and to
//! `ToBeDetected` when the shape of its requirements changes.

use crate::context::ResolutionContext;
use crate::detector::{DetectedPair, DetectionFailure, DetectionResult, Detector};
use crate::diagnostics::{dump_reasons, ScanInformation, ScanLedger, ScanSnapshot};
use crate::error::{ErrorKind, Result};
use crate::introspection::Introspector;
use crate::signal::Signal;
use mapsmith_core::{
    Definition, Deserializer, DetectionRequirementReasons, DetectionRequirements, Direction, Reason,
    RequirementKind, RequirementsChange, Serializer, TypeIdentifier,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionState {
    Unreasoned,
    ToBeDetected,
    Resolving,
    Resolved,
    Undetectable { kind: ErrorKind, reason: String },
}

impl DetectionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unreasoned => "unreasoned",
            Self::ToBeDetected => "to be detected",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
            Self::Undetectable { .. } => "undetectable",
        }
    }
}

impl fmt::Display for DetectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A serializer and/or deserializer supplied by the caller instead of detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<Serializer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deserializer: Option<Deserializer>,
}

impl ManualOverride {
    pub fn duplex(serializer: Serializer, deserializer: Deserializer) -> Self {
        Self {
            serializer: Some(serializer),
            deserializer: Some(deserializer),
        }
    }

    /// The directions this override covers.
    pub fn direction(&self) -> Option<Direction> {
        DetectionRequirements {
            serialization: self.serializer.is_some(),
            deserialization: self.deserializer.is_some(),
            has_to_be_object: false,
        }
        .direction()
    }
}

/// Mode name used in failure messages.
fn mode(requirements: DetectionRequirements) -> &'static str {
    match requirements.direction() {
        Some(Direction::Duplex) => "duplex",
        Some(Direction::Serialization) => "serializer",
        Some(Direction::Deserialization) => "deserializer",
        None => "nothing",
    }
}

#[derive(Debug, Clone)]
pub struct TypeState {
    type_identifier: TypeIdentifier,
    reasons: DetectionRequirementReasons,
    manual: Option<ManualOverride>,
    detected: Option<DetectedPair>,
    ledger: ScanLedger,
    state: DetectionState,
}

impl TypeState {
    pub fn new(type_identifier: TypeIdentifier) -> Self {
        Self {
            type_identifier,
            reasons: DetectionRequirementReasons::default(),
            manual: None,
            detected: None,
            ledger: ScanLedger::new(),
            state: DetectionState::Unreasoned,
        }
    }

    pub fn type_identifier(&self) -> &TypeIdentifier {
        &self.type_identifier
    }

    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    /// Whether the next worklist pass still has detection or resolution work for this type.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DetectionState::ToBeDetected | DetectionState::Resolving)
    }

    pub fn reasons(&self) -> &DetectionRequirementReasons {
        &self.reasons
    }

    pub fn requirements(&self) -> DetectionRequirements {
        self.reasons.requirements()
    }

    pub fn ledger(&self) -> &ScanLedger {
        &self.ledger
    }

    pub fn add_reason(&mut self, kind: RequirementKind, reason: Reason) -> Vec<Signal> {
        let change = self.reasons.add(kind, reason);
        self.apply(change)
    }

    pub fn remove_reason(&mut self, kind: RequirementKind, reason: &Reason) -> Vec<Signal> {
        let change = self.reasons.remove(kind, reason);
        self.apply(change)
    }

    /// Installs a manual override; a reasoned type is detected again.
    pub fn set_override(&mut self, manual: ManualOverride) -> Vec<Signal> {
        self.manual = Some(manual);
        if self.reasons.is_unreasoned() {
            return Vec::new();
        }
        self.transition(DetectionState::ToBeDetected)
    }

    fn apply(&mut self, change: RequirementsChange) -> Vec<Signal> {
        match change {
            RequirementsChange::NothingChanged => Vec::new(),
            RequirementsChange::Changed => self.transition(DetectionState::ToBeDetected),
            RequirementsChange::Unreasoned => self.transition(DetectionState::Unreasoned),
        }
    }

    /// Discards the previous result; a resolved type withdraws the demand it handed out.
    fn transition(&mut self, next: DetectionState) -> Vec<Signal> {
        let signals = if self.state == DetectionState::Resolved {
            vec![Signal::withdraw_dependents_of(&self.type_identifier)]
        } else {
            Vec::new()
        };
        debug!("{}: {} -> {}", self.type_identifier, self.state, next);
        self.detected = None;
        self.state = next;
        signals
    }

    /// Runs detection if this type waits for it.
    ///
    /// Only introspection errors are returned; detection failures mark the type undetectable.
    pub fn detect(
        &mut self,
        detector: &Detector,
        context: &ResolutionContext,
        introspector: &dyn Introspector,
    ) -> Result<()> {
        if self.state != DetectionState::ToBeDetected {
            return Ok(());
        }
        let requirements = self.requirements();
        let outcome = match &self.manual {
            Some(manual) => {
                self.ledger.reset();
                manual_pair(manual, requirements)
            }
            None => detector.detect(
                &self.type_identifier,
                requirements,
                &mut self.ledger,
                context,
                introspector,
            )?,
        };
        match outcome {
            Ok(pair) => {
                debug!("{}: detected {}", self.type_identifier, mode(requirements));
                self.detected = Some(pair);
                self.state = DetectionState::Resolving;
            }
            Err(failure) => {
                debug!("{}: undetectable ({})", self.type_identifier, failure.kind);
                self.state = DetectionState::Undetectable {
                    kind: failure.kind,
                    reason: format!("unable to detect {}:\n{}", mode(requirements), failure.message),
                };
            }
        }
        Ok(())
    }

    /// Types this type's pair depends on, with the kind of demand placed on each.
    pub fn dependencies(&self, context: &ResolutionContext) -> Vec<(TypeIdentifier, RequirementKind)> {
        let mut dependencies = Vec::new();
        let Some(pair) = &self.detected else {
            return dependencies;
        };
        if let Some(serializer) = &pair.serializer {
            for ty in serializer.required_types() {
                if serializer.forces_dependencies_to_be_objects() {
                    dependencies.push((ty.clone(), RequirementKind::ObjectEnforcing));
                }
                dependencies.push((ty, RequirementKind::Serialization));
            }
        }
        if let Some(deserializer) = &pair.deserializer {
            for ty in deserializer.required_types() {
                if context.is_injected(&ty) {
                    continue;
                }
                if deserializer.forces_dependencies_to_be_objects() {
                    dependencies.push((ty.clone(), RequirementKind::ObjectEnforcing));
                }
                dependencies.push((ty, RequirementKind::Deserialization));
            }
        }
        dependencies
    }

    /// Hands out demand for every dependency and settles as resolved.
    pub fn resolve(&mut self, context: &ResolutionContext) -> Vec<Signal> {
        if self.state != DetectionState::Resolving {
            return Vec::new();
        }
        let signals: Vec<Signal> = self
            .dependencies(context)
            .into_iter()
            .map(|(target, kind)| Signal::add(target, kind, Reason::because_of(&self.type_identifier)))
            .collect();
        debug!("{}: resolved with {} dependency signals", self.type_identifier, signals.len());
        self.state = DetectionState::Resolved;
        signals
    }

    pub fn definition(&self) -> Option<Definition> {
        if self.state != DetectionState::Resolved {
            return None;
        }
        let pair = self.detected.as_ref()?;
        Definition::new(
            self.type_identifier.clone(),
            pair.serializer.clone(),
            pair.deserializer.clone(),
        )
        .ok()
    }

    pub fn scan_information(&self, reasons_for: &dyn Fn(&TypeIdentifier, RequirementKind) -> Vec<Reason>) -> ScanInformation {
        let serialization_lookup = |ty: &TypeIdentifier| reasons_for(ty, RequirementKind::Serialization);
        let deserialization_lookup = |ty: &TypeIdentifier| reasons_for(ty, RequirementKind::Deserialization);
        let failure = match &self.state {
            DetectionState::Undetectable { reason, .. } => Some(reason.clone()),
            _ => None,
        };
        let pair = self.detected.as_ref();
        ScanInformation::from_snapshot(ScanSnapshot {
            type_identifier: &self.type_identifier,
            state: self.state.name().to_string(),
            requirements: self.requirements(),
            serialization_reasons: dump_reasons(
                &self.type_identifier,
                &self.reasons.serialization,
                &serialization_lookup,
            ),
            deserialization_reasons: dump_reasons(
                &self.type_identifier,
                &self.reasons.deserialization,
                &deserialization_lookup,
            ),
            serializer: pair.and_then(|p| p.serializer.as_ref()),
            deserializer: pair.and_then(|p| p.deserializer.as_ref()),
            failure,
            ledger: &self.ledger,
        })
    }
}

fn manual_pair(manual: &ManualOverride, requirements: DetectionRequirements) -> DetectionResult<DetectedPair> {
    if requirements.serialization && manual.serializer.is_none() {
        return Err(DetectionFailure::new(
            ErrorKind::NoCandidates,
            "the manual registration provides no serializer",
        ));
    }
    if requirements.deserialization && manual.deserializer.is_none() {
        return Err(DetectionFailure::new(
            ErrorKind::NoCandidates,
            "the manual registration provides no deserializer",
        ));
    }
    Ok(DetectedPair {
        serializer: manual.serializer.clone().filter(|_| requirements.serialization),
        deserializer: manual.deserializer.clone().filter(|_| requirements.deserialization),
    })
}

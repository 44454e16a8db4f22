//! The type graph orchestrator.
//!
//! Holds one [`TypeState`] per type ever signalled and a queue of pending
//! signals. [`Orchestrator::resolve_all`] drains the queue, detects every type
//! waiting for detection, resolves every detected type (which queues demand for
//! its dependencies) and repeats until nothing is pending.

use crate::context::ResolutionContext;
use crate::detector::Detector;
use crate::diagnostics::{dump_reasons, ScanInformation};
use crate::error::{ErrorKind, ResolverError, Result};
use crate::introspection::Introspector;
use crate::log::StateLog;
use crate::signal::Signal;
use crate::state::{DetectionState, TypeState};
use indexmap::{IndexMap, IndexSet};
use mapsmith_core::{Definition, Direction, Reason, RequirementKind, TypeIdentifier};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

pub use crate::state::ManualOverride;

const AGGREGATE_HEADER: &str = "The following types could not be detected properly:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "failure", rename_all = "snake_case")]
pub enum FailureKind {
    /// Detection itself failed for this type.
    Undetectable { error: ErrorKind },
    /// The type resolved, but something it depends on did not.
    DependencyFailed { root: TypeIdentifier },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(rename = "type")]
    pub type_identifier: TypeIdentifier,
    #[serde(flatten)]
    pub kind: FailureKind,
    pub message: String,
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<ScanInformation>,
}

impl Failure {
    fn block(&self) -> String {
        let mut block = format!("{}: {}", self.type_identifier.description(), self.message);
        if let Some(diagnostics) = &self.diagnostics {
            block.push_str("\n\n");
            block.push_str(diagnostics.to_string().trim_end());
        }
        block
    }
}

/// Outcome of [`Orchestrator::resolve_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub definitions: IndexMap<TypeIdentifier, Definition>,
    pub failures: Vec<Failure>,
}

impl Resolution {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_report(&self) -> String {
        let blocks: Vec<String> = self.failures.iter().map(Failure::block).collect();
        format!("{}\n\n{}", AGGREGATE_HEADER, blocks.join("\n\n"))
    }

    /// The definitions, or one error naming every failed type.
    pub fn into_result(self) -> Result<IndexMap<TypeIdentifier, Definition>> {
        if self.failures.is_empty() {
            Ok(self.definitions)
        } else {
            Err(ResolverError::Undetectable(self.failure_report()))
        }
    }
}

pub struct Orchestrator {
    detector: Detector,
    context: ResolutionContext,
    introspector: Box<dyn Introspector>,
    states: IndexMap<TypeIdentifier, TypeState>,
    signals: VecDeque<Signal>,
    log: StateLog,
}

impl Orchestrator {
    pub fn new(introspector: Box<dyn Introspector>, context: ResolutionContext) -> Self {
        Self {
            detector: Detector::default(),
            context,
            introspector,
            states: IndexMap::new(),
            signals: VecDeque::new(),
            log: StateLog::new(),
        }
    }

    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    pub fn log(&self) -> &StateLog {
        &self.log
    }

    pub fn register_demand(&mut self, ty: TypeIdentifier, direction: Direction, reason: Reason) {
        for kind in direction.kinds() {
            self.signals.push_back(Signal::add(ty.clone(), *kind, reason.clone()));
        }
    }

    pub fn remove_demand(&mut self, ty: TypeIdentifier, direction: Direction, reason: Reason) {
        for kind in direction.kinds() {
            self.signals.push_back(Signal::remove(ty.clone(), *kind, reason.clone()));
        }
    }

    /// Replaces detection for `ty` without demanding it.
    pub fn register_override(&mut self, ty: TypeIdentifier, manual: ManualOverride) {
        let signals = self
            .states
            .entry(ty.clone())
            .or_insert_with(|| TypeState::new(ty))
            .set_override(manual);
        self.signals.extend(signals);
    }

    /// Overrides `ty` and demands it in every direction the override covers.
    pub fn register_manual(&mut self, ty: TypeIdentifier, manual: ManualOverride) {
        let direction = manual.direction();
        self.register_override(ty.clone(), manual);
        if let Some(direction) = direction {
            self.register_demand(ty, direction, Reason::manually_added());
        }
    }

    pub fn state_of(&self, ty: &TypeIdentifier) -> Option<&DetectionState> {
        self.states.get(ty).map(TypeState::state)
    }

    pub fn diagnostics_for(&self, ty: &TypeIdentifier) -> Option<ScanInformation> {
        let state = self.states.get(ty)?;
        Some(state.scan_information(&|parent, kind| self.reasons_of(parent, kind)))
    }

    fn reasons_of(&self, ty: &TypeIdentifier, kind: RequirementKind) -> Vec<Reason> {
        self.states
            .get(ty)
            .map(|s| s.reasons().reasons(kind).to_vec())
            .unwrap_or_default()
    }

    /// Runs the worklist until no signal is pending and no type waits for detection.
    ///
    /// A type put back into detection outside a signal (a late manual override)
    /// is picked up by the first pass even when the queue is empty.
    ///
    /// Only introspection errors abort; every other problem ends up in the resolution's failures.
    pub fn resolve_all(&mut self) -> Result<Resolution> {
        let Self {
            detector,
            context,
            introspector,
            states,
            signals,
            log,
        } = self;
        let mut pass = 0;
        while !signals.is_empty() || states.values().any(TypeState::is_pending) {
            pass += 1;
            while let Some(signal) = signals.pop_front() {
                let emitted = dispatch(states, &signal);
                log.record(&signal, states.values());
                signals.extend(emitted);
            }
            for state in states.values_mut() {
                state.detect(detector, context, &**introspector)?;
            }
            for state in states.values_mut() {
                signals.extend(state.resolve(context));
            }
            debug!("Worklist pass {} left {} pending signals", pass, signals.len());
        }
        let resolution = self.resolution();
        info!(
            "Resolved {} definitions with {} failures",
            resolution.definitions.len(),
            resolution.failures.len()
        );
        Ok(resolution)
    }

    fn resolution(&self) -> Resolution {
        let mut resolution = Resolution::default();
        for (ty, state) in &self.states {
            match state.state() {
                DetectionState::Undetectable { kind, reason } => {
                    warn!("{} is undetectable: {}", ty, kind);
                    resolution.failures.push(Failure {
                        type_identifier: ty.clone(),
                        kind: FailureKind::Undetectable { error: *kind },
                        message: reason.clone(),
                        reasons: self.reason_lines(state),
                        diagnostics: self.diagnostics_for(ty),
                    });
                }
                DetectionState::Resolved => match self.failed_dependency(state) {
                    Some(root) => resolution.failures.push(Failure {
                        type_identifier: ty.clone(),
                        message: format!("depends on '{}' which could not be detected", root.description()),
                        kind: FailureKind::DependencyFailed { root },
                        reasons: self.reason_lines(state),
                        diagnostics: None,
                    }),
                    None => {
                        if let Some(definition) = state.definition() {
                            resolution.definitions.insert(ty.clone(), definition);
                        }
                    }
                },
                _ => {}
            }
        }
        resolution
    }

    fn reason_lines(&self, state: &TypeState) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        for kind in [RequirementKind::Serialization, RequirementKind::Deserialization] {
            let lookup = |parent: &TypeIdentifier| self.reasons_of(parent, kind);
            for line in dump_reasons(state.type_identifier(), state.reasons().reasons(kind), &lookup) {
                if !lines.contains(&line) {
                    lines.push(line);
                }
            }
        }
        lines
    }

    /// First undetectable type in the dependency closure, breadth first.
    fn failed_dependency(&self, state: &TypeState) -> Option<TypeIdentifier> {
        let mut visited: IndexSet<TypeIdentifier> = IndexSet::new();
        visited.insert(state.type_identifier().clone());
        let mut queue: VecDeque<&TypeState> = VecDeque::from([state]);
        while let Some(current) = queue.pop_front() {
            for (dependency, _) in current.dependencies(&self.context) {
                if !visited.insert(dependency.clone()) {
                    continue;
                }
                let Some(next) = self.states.get(&dependency) else {
                    continue;
                };
                if matches!(next.state(), DetectionState::Undetectable { .. }) {
                    return Some(dependency);
                }
                queue.push_back(next);
            }
        }
        None
    }
}

fn dispatch(states: &mut IndexMap<TypeIdentifier, TypeState>, signal: &Signal) -> Vec<Signal> {
    match signal {
        Signal::AddReason { target, kind, reason } => states
            .entry(target.clone())
            .or_insert_with(|| TypeState::new(target.clone()))
            .add_reason(*kind, reason.clone()),
        Signal::RemoveReason { target, kind, reason } => {
            let kinds = Signal::removal_kinds(*kind);
            let mut emitted = Vec::new();
            for state in states.values_mut() {
                if target.as_ref().is_some_and(|t| t != state.type_identifier()) {
                    continue;
                }
                for kind in &kinds {
                    emitted.extend(state.remove_reason(*kind, reason));
                }
            }
            emitted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::{IntrospectionError, MapIntrospector, TypeDescription};
    use mapsmith_core::candidate::{CustomPrimitiveDeserializer, CustomPrimitiveSerializer};
    use mapsmith_core::{Deserializer, PrimitiveKind, RealType, Serializer};
    use rstest::rstest;

    fn class(name: &str) -> TypeIdentifier {
        TypeIdentifier::class(name)
    }

    /// A class with public fields and a constructor taking all of them.
    fn record(name: &str, fields: &[(&str, &str)]) -> TypeDescription {
        let parameters: Vec<(&str, TypeIdentifier)> = fields.iter().map(|(n, t)| (*n, class(t))).collect();
        fields
            .iter()
            .fold(TypeDescription::class(class(name)), |d, (n, t)| d.with_public_field(n, class(t)))
            .with_constructor(&parameters)
    }

    fn orchestrator(introspector: MapIntrospector, context: ResolutionContext) -> Orchestrator {
        Orchestrator::new(Box::new(introspector), context)
    }

    #[test]
    fn test_duplex_object_with_dependencies() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new().with(record("Pair", &[("a", "String"), ("b", "int")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(class("Pair"), Direction::Duplex, Reason::manually_added());

        let definitions = orchestrator.resolve_all()?.into_result()?;
        assert_eq!(definitions.len(), 3);
        assert!(definitions[&class("Pair")].is_duplex());
        assert_eq!(definitions[&class("int")].classification(), "Custom Primitive");
        Ok(())
    }

    #[test]
    fn test_larger_signature_wins_with_injected_field() -> anyhow::Result<()> {
        let description = record("Pair", &[("a", "String"), ("b", "int")]).with_constructor(&[("a", class("String"))]);
        let context = ResolutionContext::default().with_injected(class("int"));
        let mut orchestrator = orchestrator(MapIntrospector::new().with(description), context);
        orchestrator.register_demand(class("Pair"), Direction::Duplex, Reason::manually_added());

        let definitions = orchestrator.resolve_all()?.into_result()?;
        match &definitions[&class("Pair")].deserializer {
            Some(Deserializer::SerializedObject(object)) => assert_eq!(object.fields.len(), 2),
            other => panic!("unexpected deserializer {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_map_demands_key_and_value_types() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new().with(record("Person", &[("name", "String")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        let map = TypeIdentifier::parse("Map<String, Person>")?;
        orchestrator.register_demand(map.clone(), Direction::Duplex, Reason::manually_added());

        let definitions = orchestrator.resolve_all()?.into_result()?;
        assert_eq!(definitions[&map].classification(), "Map");
        assert_eq!(definitions[&class("Person")].classification(), "Serialized Object");
        assert_eq!(
            orchestrator.reasons_of(&class("Person"), RequirementKind::Deserialization),
            vec![Reason::because_of(&map)]
        );
        Ok(())
    }

    #[test]
    fn test_manual_override_bypasses_ambiguous_detection() -> anyhow::Result<()> {
        let ty = class("Conflicted");
        let description = TypeDescription::class(ty.clone())
            .with_public_field("x", class("String"))
            .with_public_field("y", class("String"))
            .with_constructor(&[("x", class("String"))])
            .with_constructor(&[("y", class("String"))]);
        let mut orchestrator = orchestrator(MapIntrospector::new().with(description), ResolutionContext::default());
        orchestrator.register_manual(
            ty.clone(),
            ManualOverride::duplex(
                Serializer::CustomPrimitive(CustomPrimitiveSerializer::method(PrimitiveKind::String, "stringValue")),
                Deserializer::CustomPrimitive(CustomPrimitiveDeserializer::factory_method(
                    PrimitiveKind::String,
                    "fromString",
                )),
            ),
        );

        let definitions = orchestrator.resolve_all()?.into_result()?;
        assert_eq!(definitions[&ty].classification(), "Custom Primitive");
        Ok(())
    }

    fn string_primitive_override() -> ManualOverride {
        ManualOverride::duplex(
            Serializer::CustomPrimitive(CustomPrimitiveSerializer::method(PrimitiveKind::String, "stringValue")),
            Deserializer::CustomPrimitive(CustomPrimitiveDeserializer::factory_method(
                PrimitiveKind::String,
                "fromString",
            )),
        )
    }

    #[rstest]
    #[case::override_only(false)]
    #[case::manual_registration(true)]
    fn test_override_after_failed_run_is_detected_again(#[case] register_manual: bool) -> anyhow::Result<()> {
        let ty = class("Opaque");
        let introspector = MapIntrospector::new().with(TypeDescription::class(ty.clone()));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(ty.clone(), Direction::Duplex, Reason::manually_added());

        let first = orchestrator.resolve_all()?;
        assert!(first.definitions.is_empty());
        assert_eq!(first.failures.len(), 1);
        assert!(matches!(
            orchestrator.state_of(&ty),
            Some(DetectionState::Undetectable { .. })
        ));

        if register_manual {
            orchestrator.register_manual(ty.clone(), string_primitive_override());
        } else {
            orchestrator.register_override(ty.clone(), string_primitive_override());
        }
        let second = orchestrator.resolve_all()?;
        assert!(second.failures.is_empty());
        assert_eq!(second.definitions[&ty].classification(), "Custom Primitive");
        assert_eq!(orchestrator.state_of(&ty), Some(&DetectionState::Resolved));
        Ok(())
    }

    #[test]
    fn test_idle_run_changes_nothing() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new().with(record("Person", &[("name", "String")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(class("Person"), Direction::Duplex, Reason::manually_added());
        let first = orchestrator.resolve_all()?;
        let second = orchestrator.resolve_all()?;
        assert_eq!(first.definitions, second.definitions);
        Ok(())
    }

    #[test]
    fn test_ambiguity_without_override_lists_every_class() -> anyhow::Result<()> {
        let ty = class("Conflicted");
        let description = TypeDescription::class(ty.clone())
            .with_public_field("x", class("String"))
            .with_public_field("y", class("String"))
            .with_constructor(&[("x", class("String"))])
            .with_constructor(&[("y", class("String"))]);
        let mut orchestrator = orchestrator(MapIntrospector::new().with(description), ResolutionContext::default());
        orchestrator.register_demand(ty.clone(), Direction::Duplex, Reason::manually_added());

        let resolution = orchestrator.resolve_all()?;
        let failure = &resolution.failures[0];
        assert_eq!(
            failure.kind,
            FailureKind::Undetectable {
                error: ErrorKind::AmbiguousCandidates
            }
        );
        assert!(failure.message.contains("as serialized object using constructor (x: String)"));
        assert!(failure.message.contains("as serialized object using constructor (y: String)"));
        Ok(())
    }

    #[test]
    fn test_removing_last_reason_unreasons_the_whole_subgraph() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new().with(record("Person", &[("name", "String")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(class("Person"), Direction::Duplex, Reason::manually_added());
        assert_eq!(orchestrator.resolve_all()?.definitions.len(), 2);

        orchestrator.remove_demand(class("Person"), Direction::Duplex, Reason::manually_added());
        let resolution = orchestrator.resolve_all()?;
        assert!(resolution.definitions.is_empty());
        assert_eq!(orchestrator.state_of(&class("Person")), Some(&DetectionState::Unreasoned));
        assert_eq!(orchestrator.state_of(&class("String")), Some(&DetectionState::Unreasoned));
        assert!(!orchestrator.log().is_empty());
        Ok(())
    }

    #[test]
    fn test_root_cause_reason_chain_and_dependency_failures() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new()
            .with(record("Level1", &[("next", "Level2")]))
            .with(record("Level2", &[("next", "Level3")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(class("Level1"), Direction::Serialization, Reason::manually_added());

        let resolution = orchestrator.resolve_all()?;
        assert!(resolution.definitions.is_empty());
        let root = resolution
            .failures
            .iter()
            .find(|f| f.type_identifier == class("Level3"))
            .unwrap();
        assert_eq!(root.reasons, vec!["Level2 -> Level1 -> manually added"]);
        assert!(root.message.starts_with("unable to detect serializer:\n"));

        let dependent = resolution
            .failures
            .iter()
            .find(|f| f.type_identifier == class("Level1"))
            .unwrap();
        assert_eq!(dependent.kind, FailureKind::DependencyFailed { root: class("Level3") });
        assert_eq!(dependent.message, "depends on 'Level3' which could not be detected");

        let report = resolution.into_result().unwrap_err().to_string();
        assert!(report.starts_with("The following types could not be detected properly:\n\n"));
        Ok(())
    }

    #[test]
    fn test_cyclic_reason_chain_is_truncated() -> anyhow::Result<()> {
        let introspector = MapIntrospector::new()
            .with(record("LevelA", &[("b", "LevelB")]))
            .with(record("LevelB", &[("a", "LevelA"), ("ghost", "Ghost")]));
        let mut orchestrator = orchestrator(introspector, ResolutionContext::default());
        orchestrator.register_demand(class("LevelA"), Direction::Serialization, Reason::manually_added());

        let resolution = orchestrator.resolve_all()?;
        let ghost = resolution
            .failures
            .iter()
            .find(|f| f.type_identifier == class("Ghost"))
            .unwrap();
        assert_eq!(
            ghost.reasons,
            vec!["LevelB -> LevelA -> manually added", "LevelB -> LevelA -> LevelB..."]
        );
        Ok(())
    }

    struct NamelessIntrospector;

    impl Introspector for NamelessIntrospector {
        fn describe(&self, ty: &RealType) -> std::result::Result<TypeDescription, IntrospectionError> {
            Err(IntrospectionError::ParameterNamesUnavailable {
                type_name: ty.to_string(),
                member: "constructor".into(),
            })
        }
    }

    #[test]
    fn test_missing_parameter_names_abort_resolution() {
        let mut orchestrator = Orchestrator::new(Box::new(NamelessIntrospector), ResolutionContext::default());
        orchestrator.register_demand(class("Person"), Direction::Duplex, Reason::manually_added());
        assert!(matches!(
            orchestrator.resolve_all(),
            Err(ResolverError::Introspection(IntrospectionError::ParameterNamesUnavailable { .. }))
        ));
    }

    #[test]
    fn test_diagnostics_show_struck_candidates() -> anyhow::Result<()> {
        let description = record("Money", &[("amount", "String")])
            .with_accessor("stringValue", class("String"))
            .with_factory("fromString", &[("value", class("String"))]);
        let mut orchestrator = orchestrator(MapIntrospector::new().with(description), ResolutionContext::default());
        orchestrator.register_demand(class("Money"), Direction::Duplex, Reason::manually_added());
        orchestrator.resolve_all()?;

        let information = orchestrator.diagnostics_for(&class("Money")).unwrap();
        assert_eq!(information.state, "resolved");
        assert!(information.serializer.unwrap().contains("stringValue"));
        assert!(information
            .serialization_fields
            .iter()
            .all(|f| !f.ignored_because.is_empty()));
        Ok(())
    }
}

//! Demand placed on a type, and the reasons backing it.

use crate::reason::Reason;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Serialization,
    Deserialization,
    /// The type must be mapped as an object (e.g. a polymorphic subtype).
    ObjectEnforcing,
}

/// Direction of a registration or root entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Serialization,
    Deserialization,
    Duplex,
}

impl Direction {
    pub fn kinds(self) -> &'static [RequirementKind] {
        match self {
            Self::Serialization => &[RequirementKind::Serialization],
            Self::Deserialization => &[RequirementKind::Deserialization],
            Self::Duplex => &[RequirementKind::Serialization, RequirementKind::Deserialization],
        }
    }
}

/// The shape of the demand on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DetectionRequirements {
    pub serialization: bool,
    pub deserialization: bool,
    pub has_to_be_object: bool,
}

impl DetectionRequirements {
    pub fn is_unreasoned(&self) -> bool {
        !self.serialization && !self.deserialization
    }

    pub fn is_duplex(&self) -> bool {
        self.serialization && self.deserialization
    }

    pub fn is_serialization_only(&self) -> bool {
        self.serialization && !self.deserialization
    }

    pub fn is_deserialization_only(&self) -> bool {
        !self.serialization && self.deserialization
    }

    pub fn direction(&self) -> Option<Direction> {
        match (self.serialization, self.deserialization) {
            (true, true) => Some(Direction::Duplex),
            (true, false) => Some(Direction::Serialization),
            (false, true) => Some(Direction::Deserialization),
            (false, false) => None,
        }
    }
}

impl fmt::Display for DetectionRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.direction() {
            Some(Direction::Duplex) => "duplex",
            Some(Direction::Serialization) => "serialization",
            Some(Direction::Deserialization) => "deserialization",
            None => "none",
        };
        write!(f, "{}", mode)?;
        if self.has_to_be_object {
            write!(f, " (object)")?;
        }
        Ok(())
    }
}

/// Outcome of changing the reasons of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementsChange {
    NothingChanged,
    /// The shape changed and at least one reason remains.
    Changed,
    /// No serialization or deserialization reason remains.
    Unreasoned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRequirementReasons {
    pub serialization: Vec<Reason>,
    pub deserialization: Vec<Reason>,
    pub object_enforcing: Vec<Reason>,
}

impl DetectionRequirementReasons {
    pub fn reasons(&self, kind: RequirementKind) -> &[Reason] {
        match kind {
            RequirementKind::Serialization => &self.serialization,
            RequirementKind::Deserialization => &self.deserialization,
            RequirementKind::ObjectEnforcing => &self.object_enforcing,
        }
    }

    fn reasons_mut(&mut self, kind: RequirementKind) -> &mut Vec<Reason> {
        match kind {
            RequirementKind::Serialization => &mut self.serialization,
            RequirementKind::Deserialization => &mut self.deserialization,
            RequirementKind::ObjectEnforcing => &mut self.object_enforcing,
        }
    }

    pub fn requirements(&self) -> DetectionRequirements {
        DetectionRequirements {
            serialization: !self.serialization.is_empty(),
            deserialization: !self.deserialization.is_empty(),
            has_to_be_object: !self.object_enforcing.is_empty(),
        }
    }

    pub fn is_unreasoned(&self) -> bool {
        self.requirements().is_unreasoned()
    }

    /// Reasons the type has to be mapped at all, serialization first.
    pub fn all_reasons(&self) -> Vec<Reason> {
        let mut all = Vec::new();
        for reason in self.serialization.iter().chain(&self.deserialization) {
            if !all.contains(reason) {
                all.push(reason.clone());
            }
        }
        all
    }

    pub fn add(&mut self, kind: RequirementKind, reason: Reason) -> RequirementsChange {
        let before = self.requirements();
        let reasons = self.reasons_mut(kind);
        if !reasons.contains(&reason) {
            reasons.push(reason);
        }
        self.change_since(before)
    }

    pub fn remove(&mut self, kind: RequirementKind, reason: &Reason) -> RequirementsChange {
        let before = self.requirements();
        self.reasons_mut(kind).retain(|r| r != reason);
        self.change_since(before)
    }

    fn change_since(&self, before: DetectionRequirements) -> RequirementsChange {
        let after = self.requirements();
        if after.is_unreasoned() {
            if before.is_unreasoned() {
                RequirementsChange::NothingChanged
            } else {
                RequirementsChange::Unreasoned
            }
        } else if after != before {
            RequirementsChange::Changed
        } else {
            RequirementsChange::NothingChanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::TypeIdentifier;

    #[test]
    fn test_adding_a_second_reason_to_same_direction_changes_nothing() {
        let mut reasons = DetectionRequirementReasons::default();
        assert_eq!(
            reasons.add(RequirementKind::Serialization, Reason::manually_added()),
            RequirementsChange::Changed
        );
        let parent = TypeIdentifier::class("Parent");
        assert_eq!(
            reasons.add(RequirementKind::Serialization, Reason::because_of(&parent)),
            RequirementsChange::NothingChanged
        );
        assert_eq!(reasons.serialization.len(), 2);
    }

    #[test]
    fn test_duplicate_reasons_are_kept_once() {
        let mut reasons = DetectionRequirementReasons::default();
        reasons.add(RequirementKind::Deserialization, Reason::manually_added());
        reasons.add(RequirementKind::Deserialization, Reason::manually_added());
        assert_eq!(reasons.deserialization.len(), 1);
    }

    #[test]
    fn test_removing_last_reason_is_unreasoned() {
        let mut reasons = DetectionRequirementReasons::default();
        reasons.add(RequirementKind::Serialization, Reason::manually_added());
        reasons.add(RequirementKind::Deserialization, Reason::manually_added());
        assert_eq!(
            reasons.remove(RequirementKind::Serialization, &Reason::manually_added()),
            RequirementsChange::Changed
        );
        assert_eq!(
            reasons.remove(RequirementKind::Deserialization, &Reason::manually_added()),
            RequirementsChange::Unreasoned
        );
        assert!(reasons.is_unreasoned());
    }

    #[test]
    fn test_object_enforcing_alone_is_still_unreasoned() {
        let mut reasons = DetectionRequirementReasons::default();
        let change = reasons.add(RequirementKind::ObjectEnforcing, Reason::manually_added());
        assert_eq!(change, RequirementsChange::NothingChanged);
        assert!(reasons.requirements().has_to_be_object);
        assert!(reasons.is_unreasoned());
    }

    #[test]
    fn test_requirements_display() {
        let requirements = DetectionRequirements {
            serialization: true,
            deserialization: true,
            has_to_be_object: true,
        };
        assert_eq!(requirements.to_string(), "duplex (object)");
    }
}

//! Demand signals exchanged between the orchestrator and type states.

use mapsmith_core::{Reason, RequirementKind, TypeIdentifier};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    AddReason {
        target: TypeIdentifier,
        kind: RequirementKind,
        reason: Reason,
    },
    /// `None` as target reaches every known type; `None` as kind removes the reason from every kind.
    RemoveReason {
        target: Option<TypeIdentifier>,
        kind: Option<RequirementKind>,
        reason: Reason,
    },
}

const ALL_KINDS: [RequirementKind; 3] = [
    RequirementKind::Serialization,
    RequirementKind::Deserialization,
    RequirementKind::ObjectEnforcing,
];

impl Signal {
    pub fn add(target: TypeIdentifier, kind: RequirementKind, reason: Reason) -> Self {
        Self::AddReason { target, kind, reason }
    }

    pub fn remove(target: TypeIdentifier, kind: RequirementKind, reason: Reason) -> Self {
        Self::RemoveReason {
            target: Some(target),
            kind: Some(kind),
            reason,
        }
    }

    /// Withdraws every `because of <parent>` reason handed out by `parent`.
    pub fn withdraw_dependents_of(parent: &TypeIdentifier) -> Self {
        Self::RemoveReason {
            target: None,
            kind: None,
            reason: Reason::because_of(parent),
        }
    }

    /// Kinds a removal applies to.
    pub fn removal_kinds(kind: Option<RequirementKind>) -> Vec<RequirementKind> {
        match kind {
            Some(kind) => vec![kind],
            None => ALL_KINDS.to_vec(),
        }
    }
}

fn kind_name(kind: RequirementKind) -> &'static str {
    match kind {
        RequirementKind::Serialization => "serialization",
        RequirementKind::Deserialization => "deserialization",
        RequirementKind::ObjectEnforcing => "object enforcing",
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddReason { target, kind, reason } => {
                write!(f, "add {} reason '{}' to {}", kind_name(*kind), reason, target.description())
            }
            Self::RemoveReason { target, kind, reason } => {
                let kind = kind.map(kind_name).unwrap_or("every");
                let target = target.as_ref().map(TypeIdentifier::description).unwrap_or_else(|| "all types".into());
                write!(f, "remove {} reason '{}' from {}", kind, reason, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_descriptions() {
        let person = TypeIdentifier::class("Person");
        assert_eq!(
            Signal::add(person.clone(), RequirementKind::Serialization, Reason::manually_added()).to_string(),
            "add serialization reason 'manually added' to Person"
        );
        assert_eq!(
            Signal::withdraw_dependents_of(&person).to_string(),
            "remove every reason 'because of Person' from all types"
        );
    }

    #[test]
    fn test_removal_without_kind_reaches_every_kind() {
        assert_eq!(Signal::removal_kinds(None).len(), 3);
        assert_eq!(
            Signal::removal_kinds(Some(RequirementKind::Deserialization)),
            vec![RequirementKind::Deserialization]
        );
    }
}

use crate::naming::TypeIdentifier;
use serde::{Deserialize, Serialize};
use std::fmt;

const MANUALLY_ADDED: &str = "manually added";

/// Why a type has to be mapped.
///
/// A root reason is free text. A derived reason points at the parent type
/// whose mapping requires this one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reason {
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeIdentifier>,
}

impl Reason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            parent: None,
        }
    }

    pub fn manually_added() -> Self {
        Self::new(MANUALLY_ADDED)
    }

    pub fn because_of(parent: &TypeIdentifier) -> Self {
        Self {
            reason: format!("because of {}", parent.description()),
            parent: Some(parent.clone()),
        }
    }

    pub fn is_because_of(&self, ty: &TypeIdentifier) -> bool {
        self.parent.as_ref() == Some(ty)
    }

    /// Renders every chain from this reason back to a root reason.
    ///
    /// `owner` is the type holding this reason. A parent that is already on the
    /// chain being rendered is printed as `Parent...` and not followed again.
    pub fn render(&self, owner: &TypeIdentifier, reasons_for: &dyn Fn(&TypeIdentifier) -> Vec<Reason>) -> Vec<String> {
        let mut path = vec![owner.clone()];
        self.render_on_path(&mut path, reasons_for)
    }

    fn render_on_path(
        &self,
        path: &mut Vec<TypeIdentifier>,
        reasons_for: &dyn Fn(&TypeIdentifier) -> Vec<Reason>,
    ) -> Vec<String> {
        let Some(parent) = &self.parent else {
            return vec![self.reason.clone()];
        };
        let parent_name = parent.description();
        if path.contains(parent) {
            return vec![format!("{}...", parent_name)];
        }
        let parent_reasons = reasons_for(parent);
        if parent_reasons.is_empty() {
            return vec![parent_name];
        }
        path.push(parent.clone());
        let mut lines = Vec::new();
        for parent_reason in &parent_reasons {
            for line in parent_reason.render_on_path(path, reasons_for) {
                lines.push(format!("{} -> {}", parent_name, line));
            }
        }
        path.pop();
        lines
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ty(name: &str) -> TypeIdentifier {
        TypeIdentifier::class(name)
    }

    #[test]
    fn test_root_reason_renders_itself() {
        let lines = Reason::manually_added().render(&ty("A"), &|_| Vec::new());
        assert_eq!(lines, vec!["manually added"]);
    }

    #[test]
    fn test_chain_walks_parents() {
        let mut reasons: HashMap<TypeIdentifier, Vec<Reason>> = HashMap::new();
        reasons.insert(ty("Level1"), vec![Reason::manually_added()]);
        let lookup = |t: &TypeIdentifier| reasons.get(t).cloned().unwrap_or_default();

        let lines = Reason::because_of(&ty("Level1")).render(&ty("Level2"), &lookup);
        assert_eq!(lines, vec!["Level1 -> manually added"]);
    }

    #[test]
    fn test_cycles_are_cut() {
        let mut reasons: HashMap<TypeIdentifier, Vec<Reason>> = HashMap::new();
        reasons.insert(
            ty("LevelA"),
            vec![Reason::manually_added(), Reason::because_of(&ty("LevelB"))],
        );
        reasons.insert(ty("LevelB"), vec![Reason::because_of(&ty("LevelA"))]);
        let lookup = |t: &TypeIdentifier| reasons.get(t).cloned().unwrap_or_default();

        let lines = Reason::because_of(&ty("LevelA")).render(&ty("LevelB"), &lookup);
        assert_eq!(lines, vec!["LevelA -> manually added", "LevelA -> LevelB..."]);
    }

    #[test]
    fn test_because_of_text() {
        let reason = Reason::because_of(&TypeIdentifier::list_of(ty("Tag")));
        assert_eq!(reason.to_string(), "because of List<Tag>");
        assert!(reason.is_because_of(&TypeIdentifier::list_of(ty("Tag"))));
    }
}

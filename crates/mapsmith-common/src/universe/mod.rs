//! Type universe descriptors.
//!
//! A universe lists the types available for mapping, the roots the caller
//! wants mapped and any hand-registered candidates. It stands in for runtime
//! reflection: [`UniverseIntrospector`] answers the resolver's introspection
//! queries from it.

pub mod descriptor;
pub mod introspector;

use mapsmith_core::{Reason, TypeIdentifier};
use mapsmith_resolver::{Orchestrator, ResolutionContext};
use std::path::Path;
use tracing::debug;

pub use self::descriptor::*;
pub use self::introspector::UniverseIntrospector;

const ROOT_REASON: &str = "declared as root";

impl UniverseDescriptor {
    /// Load a descriptor from a file path
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            return Ok(toml::from_str(&content)?);
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn type_entry(&self, ty: &TypeIdentifier) -> Option<&TypeEntry> {
        self.types.iter().find(|entry| &entry.name == ty)
    }

    /// An orchestrator with every root demanded and every override registered.
    pub fn orchestrator(&self, context: ResolutionContext) -> crate::Result<Orchestrator> {
        let introspector = UniverseIntrospector::new(self)?;
        let mut orchestrator = Orchestrator::new(Box::new(introspector), context);
        for entry in &self.overrides {
            orchestrator.register_manual(entry.type_identifier.clone(), entry.manual_override());
        }
        for root in &self.roots {
            orchestrator.register_demand(
                root.type_identifier.clone(),
                root.direction.into(),
                Reason::new(ROOT_REASON),
            );
        }
        debug!(
            "Registered {} roots and {} overrides over {} types",
            self.roots.len(),
            self.overrides.len(),
            self.types.len()
        );
        Ok(orchestrator)
    }
}

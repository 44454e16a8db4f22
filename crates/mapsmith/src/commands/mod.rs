pub mod explain;
pub mod resolve;
pub mod roundtrip;
pub mod schema;

pub use explain::*;
pub use resolve::*;
pub use roundtrip::*;
pub use schema::*;

use anyhow::Context;
use mapsmith_common::config::{MapsmithConfig, OutputFormat};
use mapsmith_common::universe::UniverseDescriptor;
use mapsmith_core::TypeIdentifier;
use mapsmith_resolver::{Orchestrator, Resolution};
use std::path::{Path, PathBuf};
use tracing::info;

/// Exit code for runs that finished but left types undetected.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// A loaded universe together with the configuration that applies to it.
pub struct Workspace {
    pub config: MapsmithConfig,
    pub universe: UniverseDescriptor,
}

impl Workspace {
    /// Load `universe`, taking configuration from `config` or from the nearest
    /// mapsmith.toml / mapsmith.json above the working directory.
    pub fn load(universe: &Path, config: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config {
            Some(path) => MapsmithConfig::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => {
                let start_dir = std::env::current_dir().context("Failed to get current directory")?;
                MapsmithConfig::discover(&start_dir).context("Failed to load configuration")?
            }
        };
        let universe = UniverseDescriptor::load(universe)
            .with_context(|| format!("Failed to load type universe from {}", universe.display()))?;
        Ok(Self { config, universe })
    }

    pub fn orchestrator(&self) -> anyhow::Result<Orchestrator> {
        let context = self.config.detection.to_context();
        Ok(self.universe.orchestrator(context)?)
    }

    /// Run resolution to the fixed point, keeping the orchestrator for inspection.
    pub fn resolve(&self) -> anyhow::Result<(Orchestrator, Resolution)> {
        let mut orchestrator = self.orchestrator()?;
        let resolution = orchestrator.resolve_all().context("Resolution aborted")?;
        info!(
            "Resolved {} definitions with {} failures",
            resolution.definitions.len(),
            resolution.failures.len()
        );
        Ok((orchestrator, resolution))
    }

    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.config.output.format)
    }
}

pub(crate) fn parse_type(name: &str) -> anyhow::Result<TypeIdentifier> {
    TypeIdentifier::parse(name).with_context(|| format!("Invalid type name '{}'", name))
}

/// Arguments shared by every command that reads a universe.
#[derive(Debug, Clone)]
pub struct UniverseArgs {
    pub universe: PathBuf,
    pub config: Option<PathBuf>,
}

impl UniverseArgs {
    pub fn workspace(&self) -> anyhow::Result<Workspace> {
        Workspace::load(&self.universe, self.config.as_deref())
    }
}

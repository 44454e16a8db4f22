//! Record of every processed signal and the states it left behind.

use crate::signal::Signal;
use crate::state::TypeState;
use mapsmith_core::{DetectionRequirements, TypeIdentifier};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    #[serde(rename = "type")]
    pub type_identifier: TypeIdentifier,
    pub state: String,
    pub requirements: DetectionRequirements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateLogEntry {
    pub signal: String,
    pub states: Vec<StateSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateLog {
    entries: Vec<StateLogEntry>,
}

impl StateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record<'a>(&mut self, signal: &Signal, states: impl Iterator<Item = &'a TypeState>) {
        let states = states
            .map(|state| StateSnapshot {
                type_identifier: state.type_identifier().clone(),
                state: state.state().name().to_string(),
                requirements: state.requirements(),
            })
            .collect();
        self.entries.push(StateLogEntry {
            signal: signal.to_string(),
            states,
        });
    }

    pub fn entries(&self) -> &[StateLogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StateLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.signal)?;
            for state in &entry.states {
                writeln!(
                    f,
                    "\t{} [{}] ({})",
                    state.type_identifier.description(),
                    state.state,
                    state.requirements
                )?;
            }
        }
        Ok(())
    }
}

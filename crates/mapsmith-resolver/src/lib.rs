//! Resolution engine for mapsmith.
//!
//! The [`Orchestrator`] drives a worklist of demand signals over the type graph.
//! Each type walks its own state machine ([`state`]); detection gathers
//! candidates through ordered factories ([`detector`]) and picks a symmetric or
//! preferred pair ([`disambiguator`]). Every step is recorded in a per-type
//! scan ledger ([`diagnostics`]).

pub mod context;
pub mod detector;
pub mod diagnostics;
pub mod disambiguator;
pub mod error;
pub mod introspection;
pub mod log;
pub mod orchestrator;
pub mod signal;
pub mod state;

pub use context::ResolutionContext;
pub use detector::{DetectedPair, DetectionFailure, DetectionResult, Detector};
pub use diagnostics::{ScanInformation, ScanLedger};
pub use error::{ErrorKind, Result, ResolverError};
pub use introspection::{IntrospectionError, Introspector, TypeDescription};
pub use log::StateLog;
pub use orchestrator::{Failure, FailureKind, ManualOverride, Orchestrator, Resolution};
pub use state::DetectionState;

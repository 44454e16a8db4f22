//! Candidate detection.
//!
//! `detect` rejects unsupported types, runs the ordered factory list for every
//! required direction and hands the gathered candidates to the disambiguator.

pub mod factories;
pub mod support;

use crate::context::ResolutionContext;
use crate::diagnostics::ScanLedger;
use crate::disambiguator::{self, Candidates};
use crate::error::{ErrorKind, Result};
use crate::introspection::{IntrospectionError, Introspector, TypeDescription};
use factories::{DetectionFactory, Subject};
use mapsmith_core::{Deserializer, DetectionRequirements, PrimitiveKind, RealType, Serializer, TypeIdentifier};
use tracing::debug;

/// Why detection could not produce a pair for a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl DetectionFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type DetectionResult<T> = std::result::Result<T, DetectionFailure>;

/// The chosen serializer and deserializer of a type, one per required direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectedPair {
    pub serializer: Option<Serializer>,
    pub deserializer: Option<Deserializer>,
}

pub struct Detector {
    factories: Vec<Box<dyn DetectionFactory>>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(factories::default_factories())
    }
}

impl Detector {
    pub fn new(factories: Vec<Box<dyn DetectionFactory>>) -> Self {
        Self { factories }
    }

    /// Detects a pair for `ty`.
    ///
    /// The outer error aborts resolution; the inner one marks only this type undetectable.
    pub fn detect(
        &self,
        ty: &TypeIdentifier,
        requirements: DetectionRequirements,
        ledger: &mut ScanLedger,
        context: &ResolutionContext,
        introspector: &dyn Introspector,
    ) -> Result<DetectionResult<DetectedPair>> {
        ledger.reset();
        if let Some(message) = support::unsupported_identifier(ty) {
            return Ok(Err(DetectionFailure::new(ErrorKind::UnsupportedType, message)));
        }
        let description = match describe(ty, introspector) {
            Ok(description) => description,
            Err(IntrospectionError::UnknownType(name)) => {
                return Ok(Err(DetectionFailure::new(
                    ErrorKind::UnsupportedType,
                    format!("type '{}' is unknown to the introspector", name),
                )));
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(description) = &description {
            if let Some(message) = support::unsupported_description(ty, description) {
                return Ok(Err(DetectionFailure::new(ErrorKind::UnsupportedType, message)));
            }
        }

        let subject = Subject {
            identifier: ty,
            description: description.as_ref(),
        };
        let mut candidates = Candidates::default();
        for factory in &self.factories {
            if requirements.serialization {
                candidates.serializers.extend(factory.serializers(&subject, context));
            }
            if requirements.deserialization {
                candidates.deserializers.extend(factory.deserializers(&subject, context));
            }
        }
        debug!(
            "Detected {} serializer and {} deserializer candidates for {}",
            candidates.serializers.len(),
            candidates.deserializers.len(),
            ty
        );
        Ok(disambiguator::disambiguate(ty, requirements, candidates, ledger, context))
    }
}

/// Built-in primitives, collections, maps and arrays are analyzed without introspection.
fn describe(
    ty: &TypeIdentifier,
    introspector: &dyn Introspector,
) -> std::result::Result<Option<TypeDescription>, IntrospectionError> {
    match ty {
        TypeIdentifier::Real(real @ RealType::Class { .. })
            if PrimitiveKind::of(ty).is_none() && ty.map_components().is_none() =>
        {
            introspector.describe(real).map(Some)
        }
        _ => Ok(None),
    }
}

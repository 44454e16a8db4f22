//! Priority picker for a single direction.
//!
//! Each rule narrows the pool only while more than one candidate remains and
//! only when it keeps at least one. Whatever survives all rules must be unique.

use super::strike_serializer;
use crate::context::ResolutionContext;
use crate::detector::{DetectionFailure, DetectionResult};
use crate::diagnostics::ScanLedger;
use crate::error::ErrorKind;
use mapsmith_core::candidate::{ObjectFactory, PrimitiveSerializerSource};
use mapsmith_core::{Deserializer, Serializer};

type Keeps<'a, T> = Box<dyn Fn(&T, &[T]) -> bool + 'a>;

struct Rule<'a, T> {
    label: &'static str,
    keeps: Keeps<'a, T>,
}

impl<'a, T> Rule<'a, T> {
    fn new(label: &'static str, keeps: impl Fn(&T, &[T]) -> bool + 'a) -> Self {
        Self {
            label,
            keeps: Box::new(keeps),
        }
    }
}

fn narrow<T: Clone>(mut pool: Vec<T>, rules: &[Rule<'_, T>], mut dropped: impl FnMut(&T, &str)) -> Vec<T> {
    for rule in rules {
        if pool.len() <= 1 {
            break;
        }
        let (kept, rest): (Vec<T>, Vec<T>) = pool.iter().cloned().partition(|c| (rule.keeps)(c, &pool));
        if kept.is_empty() || rest.is_empty() {
            continue;
        }
        let reason = format!("less priority than {}", rule.label);
        for candidate in &rest {
            dropped(candidate, &reason);
        }
        pool = kept;
    }
    pool
}

fn single<T>(pool: Vec<T>, what: &str, describe: impl Fn(&T) -> String) -> DetectionResult<T> {
    if pool.len() > 1 {
        let lines: Vec<String> = pool.iter().map(|c| format!("\t- {}", describe(c))).collect();
        return Err(DetectionFailure::new(
            ErrorKind::AmbiguousCandidates,
            format!("ambiguous {}:\n{}", what, lines.join("\n")),
        ));
    }
    pool.into_iter().next().ok_or_else(|| {
        DetectionFailure::new(ErrorKind::NoCandidates, format!("no {} to choose from", what))
    })
}

fn object_field_count(deserializer: &Deserializer) -> Option<usize> {
    match deserializer {
        Deserializer::SerializedObject(so) => Some(so.fields.len()),
        _ => None,
    }
}

pub fn pick_deserializer(
    pool: Vec<Deserializer>,
    ledger: &mut ScanLedger,
    context: &ResolutionContext,
) -> DetectionResult<Deserializer> {
    let rules: Vec<Rule<'_, Deserializer>> = vec![
        Rule::new("an enum-backed custom primitive", |d: &Deserializer, _| {
            matches!(d, Deserializer::CustomPrimitive(cp) if cp.is_enum())
        }),
        Rule::new("a custom primitive factory with a preferred name", |d: &Deserializer, _| match d {
            Deserializer::CustomPrimitive(cp) => cp
                .factory_name()
                .is_some_and(|name| context.is_preferred_custom_primitive_factory(name)),
            _ => false,
        }),
        Rule::new("a custom primitive", |d: &Deserializer, _| d.is_custom_primitive()),
        Rule::new("a serialized object with more fields", |d: &Deserializer, pool: &[Deserializer]| {
            let most = pool.iter().filter_map(object_field_count).max();
            object_field_count(d).is_some() && object_field_count(d) == most
        }),
        Rule::new("a factory method with a preferred name", |d: &Deserializer, _| match d {
            Deserializer::SerializedObject(so) => matches!(
                &so.factory,
                ObjectFactory::FactoryMethod { name, .. } if context.is_preferred_serialized_object_factory(name)
            ),
            _ => false,
        }),
    ];
    let survivors = narrow(pool, &rules, |d, reason| ledger.strike_deserializer(d, reason));
    single(survivors, "deserializers", Deserializer::description)
}

pub fn pick_serializer(
    pool: Vec<Serializer>,
    ledger: &mut ScanLedger,
    context: &ResolutionContext,
) -> DetectionResult<Serializer> {
    let rules: Vec<Rule<'_, Serializer>> = vec![
        Rule::new("a custom primitive", |s: &Serializer, _| s.is_custom_primitive()),
        Rule::new("a custom primitive method with the preferred name", |s: &Serializer, _| match s {
            Serializer::CustomPrimitive(cp) => match &cp.source {
                PrimitiveSerializerSource::Method { name } => {
                    context.preferred_custom_primitive_serializer_name() == Some(name.as_str())
                }
                _ => false,
            },
            _ => false,
        }),
    ];
    let survivors = narrow(pool, &rules, |s, reason| strike_serializer(ledger, s, reason));
    single(survivors, "serializers", Serializer::description)
}

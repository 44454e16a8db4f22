//! Helpers for running resolution scenarios end to end.

use anyhow::Context;
use indexmap::IndexMap;
use mapsmith_common::mapper::{Instance, Mapper};
use mapsmith_common::marshal::{JsonMarshaller, Unmarshaller};
use mapsmith_common::universe::UniverseDescriptor;
use mapsmith_core::{Definition, Deserializer, Serializer, TypeIdentifier};
use mapsmith_resolver::{ResolutionContext, Resolution, ScanInformation};

/// Everything a scenario may assert on after resolving a universe.
#[derive(Debug)]
pub struct ScenarioRun {
    pub context: ResolutionContext,
    pub resolution: Resolution,
    pub diagnostics: IndexMap<TypeIdentifier, ScanInformation>,
}

pub fn parse_type(name: &str) -> anyhow::Result<TypeIdentifier> {
    TypeIdentifier::parse(name).with_context(|| format!("invalid type name '{}'", name))
}

/// Resolve a JSON universe descriptor under `context`.
pub fn resolve_universe(universe: &str, context: ResolutionContext) -> anyhow::Result<ScenarioRun> {
    let descriptor: UniverseDescriptor = serde_json::from_str(universe).context("invalid universe descriptor")?;
    let mut orchestrator = descriptor.orchestrator(context.clone())?;
    let resolution = orchestrator.resolve_all()?;

    let considered = resolution
        .definitions
        .keys()
        .chain(resolution.failures.iter().map(|f| &f.type_identifier));
    let diagnostics = considered
        .filter_map(|ty| orchestrator.diagnostics_for(ty).map(|info| (ty.clone(), info)))
        .collect();

    Ok(ScenarioRun {
        context,
        resolution,
        diagnostics,
    })
}

impl ScenarioRun {
    pub fn definition(&self, name: &str) -> anyhow::Result<&Definition> {
        let ty = parse_type(name)?;
        self.resolution
            .definitions
            .get(&ty)
            .ok_or_else(|| anyhow::anyhow!("no definition for '{}'", name))
    }

    pub fn serializer_fields(&self, name: &str) -> anyhow::Result<Vec<String>> {
        match &self.definition(name)?.serializer {
            Some(Serializer::SerializedObject(object)) => {
                Ok(object.field_names().into_iter().map(str::to_string).collect())
            }
            other => anyhow::bail!("'{}' is not serialized as an object: {:?}", name, other),
        }
    }

    pub fn deserializer_fields(&self, name: &str) -> anyhow::Result<Vec<String>> {
        match &self.definition(name)?.deserializer {
            Some(Deserializer::SerializedObject(object)) => Ok(object.fields.keys().cloned().collect()),
            other => anyhow::bail!("'{}' is not deserialized as an object: {:?}", name, other),
        }
    }

    pub fn mapper(&self) -> Mapper {
        Mapper::new(self.resolution.definitions.clone(), &self.context)
    }

    /// Read `json` as `name`, write it back and read it again.
    pub fn round_trip(&self, name: &str, json: &str) -> anyhow::Result<(Instance, Instance)> {
        let ty = parse_type(name)?;
        let mapper = self.mapper();
        let first = mapper.deserialize(&ty, &JsonMarshaller::default().unmarshal(json)?)?;
        let universal = mapper.serialize_as(&ty, &first)?;
        let second = mapper.deserialize(&ty, &universal)?;
        Ok((first, second))
    }
}

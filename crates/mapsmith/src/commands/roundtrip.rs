//! `mapsmith roundtrip`: read a JSON value as a type and write it back.

use super::{FAILURE_EXIT_CODE, UniverseArgs, parse_type};
use anyhow::Context;
use mapsmith_common::mapper::Mapper;
use mapsmith_common::marshal::{JsonMarshaller, Marshaller, Unmarshaller};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::debug;

pub fn run_roundtrip(args: UniverseArgs, type_name: String, input: PathBuf) -> anyhow::Result<u8> {
    let workspace = args.workspace()?;
    let ty = parse_type(&type_name)?;
    let (orchestrator, resolution) = workspace.resolve()?;
    if !resolution.is_success() {
        eprintln!("{}", resolution.failure_report().red());
        return Ok(FAILURE_EXIT_CODE);
    }

    let text = std::fs::read_to_string(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    let output = roundtrip(Mapper::new(resolution.definitions, orchestrator.context()), &ty, &text)?;
    println!("{}", output);
    Ok(0)
}

/// Unmarshal `text`, map it to an instance of `ty` and marshal it again.
pub fn roundtrip(mapper: Mapper, ty: &mapsmith_core::TypeIdentifier, text: &str) -> anyhow::Result<String> {
    let marshaller = JsonMarshaller::pretty();
    let universal = marshaller.unmarshal(text)?;
    let instance = mapper.deserialize(ty, &universal)?;
    debug!("Read {}", instance.describe());
    let universal = mapper.serialize_as(ty, &instance)?;
    Ok(marshaller.marshal(&universal)?)
}

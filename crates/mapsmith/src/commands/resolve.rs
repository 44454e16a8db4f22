//! `mapsmith resolve`: detect every root of a universe and report the outcome.

use super::{FAILURE_EXIT_CODE, UniverseArgs};
use mapsmith_common::config::OutputFormat;
use mapsmith_resolver::{Resolution, StateLog};
use owo_colors::OwoColorize;
use std::fmt::Write;

pub fn run_resolve(args: UniverseArgs, format: Option<OutputFormat>, state_log: bool) -> anyhow::Result<u8> {
    let workspace = args.workspace()?;
    let (orchestrator, resolution) = workspace.resolve()?;
    let log = state_log.then(|| orchestrator.log());

    match workspace.format(format) {
        OutputFormat::Json => println!("{}", render_json(&resolution, log)?),
        OutputFormat::Text => {
            print!("{}", render_text(&resolution));
            if let Some(log) = log {
                println!("\n{}", "State log".bold());
                print!("{}", log);
            }
            if !resolution.is_success() {
                eprintln!("{}", resolution.failure_report().red());
            }
        }
    }

    Ok(if resolution.is_success() { 0 } else { FAILURE_EXIT_CODE })
}

/// One block per definition, in resolution order.
pub fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();
    for (ty, definition) in &resolution.definitions {
        let _ = writeln!(out, "{} [{}]", ty.description(), definition.classification());
        if let Some(serializer) = &definition.serializer {
            let _ = writeln!(out, "  serializer: {}", serializer.description());
        }
        if let Some(deserializer) = &definition.deserializer {
            let _ = writeln!(out, "  deserializer: {}", deserializer.description());
        }
    }
    out
}

pub fn render_json(resolution: &Resolution, log: Option<&StateLog>) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(resolution)?;
    if let (Some(log), Some(map)) = (log, value.as_object_mut()) {
        map.insert("state_log".to_string(), serde_json::to_value(log)?);
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

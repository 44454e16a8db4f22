//! `mapsmith explain`: print the scan information of one type.

use super::{FAILURE_EXIT_CODE, UniverseArgs, parse_type};
use mapsmith_common::config::OutputFormat;
use mapsmith_resolver::DetectionState;

pub fn run_explain(args: UniverseArgs, type_name: String, format: Option<OutputFormat>) -> anyhow::Result<u8> {
    let workspace = args.workspace()?;
    let ty = parse_type(&type_name)?;
    let (orchestrator, _) = workspace.resolve()?;

    let information = orchestrator
        .diagnostics_for(&ty)
        .ok_or_else(|| anyhow::anyhow!("Type '{}' was never considered during resolution", ty))?;

    match workspace.format(format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&information)?),
        OutputFormat::Text => print!("{}", information),
    }

    let failed = matches!(orchestrator.state_of(&ty), Some(DetectionState::Undetectable { .. }));
    Ok(if failed { FAILURE_EXIT_CODE } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: &std::path::Path, universe: &str) -> anyhow::Result<UniverseArgs> {
        let path = dir.join("universe.json");
        std::fs::write(&path, universe)?;
        let config = dir.join("mapsmith.toml");
        std::fs::write(&config, "")?;
        Ok(UniverseArgs {
            universe: path,
            config: Some(config),
        })
    }

    #[test]
    fn test_unknown_type_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let args = args(dir.path(), r#"{ "roots": [], "types": [] }"#)?;
        assert!(run_explain(args, "Ghost".into(), None).is_err());
        Ok(())
    }

    #[test]
    fn test_undetectable_type_exits_with_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let args = args(
            dir.path(),
            r#"{
                "roots": [{ "type": "Opaque", "direction": "deserialization" }],
                "types": [{ "name": "Opaque" }]
            }"#,
        )?;
        assert_eq!(run_explain(args, "Opaque".into(), Some(OutputFormat::Json))?, FAILURE_EXIT_CODE);
        Ok(())
    }
}

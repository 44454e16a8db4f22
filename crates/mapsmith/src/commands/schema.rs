use mapsmith_common::universe::UniverseDescriptor;
use schemars::schema_for;
use std::path::PathBuf;

pub fn run_schema(output: Option<PathBuf>) -> anyhow::Result<u8> {
    let schema = schema_for!(UniverseDescriptor);
    let schema_json = serde_json::to_string_pretty(&schema)?;

    if let Some(path) = output {
        std::fs::write(&path, schema_json)
            .map_err(|e| anyhow::anyhow!("Failed to write schema to {:?}: {}", path, e))?;
    } else {
        println!("{}", schema_json);
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_written_to_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("universe.schema.json");
        assert_eq!(run_schema(Some(path.clone()))?, 0);

        let schema: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert!(schema["properties"].get("roots").is_some());
        assert!(schema["properties"].get("types").is_some());
        Ok(())
    }
}

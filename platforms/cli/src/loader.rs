//! Loads machine configurations written as JSON, from files or from string content.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tm_engine::programs::Config;

/// `ConfigLoader` reads [`Config`] values serialized with `serde_json`.
///
/// The transition table is validated while deserializing, so a file with two rules for the
/// same state and symbol fails to load.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a configuration from the JSON file at `path`.
    pub fn load_config(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        Self::load_config_from_string(&content)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    /// Loads a configuration from JSON string content, e.g. piped through stdin.
    pub fn load_config_from_string(content: &str) -> Result<Config> {
        let config: Config =
            serde_json::from_str(content).context("Invalid machine configuration")?;
        tracing::debug!(
            rules = config.table.len(),
            initial_state = %config.initial_state,
            "configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use tm_engine::TuringMachine;

    const INVERT: &str = r#"{
        "initial_tape": ["1", "0", "1"],
        "initial_head": 0,
        "initial_state": "invert",
        "halting_state": "done",
        "blank": "_",
        "table": [
            {"state": "invert", "read": "0", "next_state": "invert", "write": "1", "direction": "R"},
            {"state": "invert", "read": "1", "next_state": "invert", "write": "0", "direction": "R"},
            {"state": "invert", "read": "_", "next_state": "done", "write": "_", "direction": "N"}
        ]
    }"#;

    #[test]
    fn test_load_valid_config() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invert.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(INVERT.as_bytes()).unwrap();

        let config = ConfigLoader::load_config(&file_path).unwrap();
        assert_eq!(config.initial_state, "invert");
        assert_eq!(config.table.len(), 3);

        let mut machine = TuringMachine::new(config);
        assert!(machine.run().halted);
        assert_eq!(machine.tape().to_string(), "010_");
    }

    #[test]
    fn test_initial_head_defaults_to_zero() {
        let content = INVERT.replace("\"initial_head\": 0,", "");

        let config = ConfigLoader::load_config_from_string(&content).unwrap();
        assert_eq!(config.initial_head, 0);
    }

    #[test]
    fn test_load_invalid_config() {
        let result = ConfigLoader::load_config_from_string("This is not a configuration");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_duplicate_rules() {
        let content = INVERT.replace("\"read\": \"1\"", "\"read\": \"0\"");

        let error = ConfigLoader::load_config_from_string(&content).unwrap_err();
        assert!(format!("{:#}", error).contains("Duplicate rule"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = ConfigLoader::load_config(&dir.path().join("missing.json"));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read file"));
    }
}

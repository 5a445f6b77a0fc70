use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Match settings, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Computer difficulty, 1 to 3.
    pub tier: u8,
    /// Rounds per game.
    pub rounds: u32,
    /// Directory the per-game result files are written into.
    pub results_dir: PathBuf,
    /// Fixed seed for the computer's random choices. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            tier: 2,
            rounds: 3,
            results_dir: PathBuf::from("results"),
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: MatchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=3).contains(&self.tier) {
            return Err(ConfigError::Validation(
                "tier must be between 1 and 3".into(),
            ));
        }
        if self.rounds == 0 {
            return Err(ConfigError::Validation("rounds must be >= 1".into()));
        }
        if self.results_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "results_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&MatchConfig::default()).expect("default config serializes")
    }
}

//! Planner configuration.
//!
//! Input file locations, the default target and report options, read from a
//! TOML file.

use craftplan_core::DEFAULT_TARGET;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "craftplan.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "CRAFTPLAN_CONFIG";

/// Default recipe matrix file.
pub const DEFAULT_RECIPE_PATH: &str = "recipeData.csv";

/// Default inventory file.
pub const DEFAULT_INVENTORY_PATH: &str = "inventoryData.csv";

/// Planner configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Recipe matrix CSV
    pub recipe_path: PathBuf,
    /// Inventory CSV
    pub inventory_path: PathBuf,
    /// Target used when none is given on the command line
    pub default_target: String,
    /// Include the collapsible data loading sections in the report
    pub show_loading_sections: bool,
    /// Also write the plan as JSON to this path
    pub json_output: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            recipe_path: PathBuf::from(DEFAULT_RECIPE_PATH),
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            default_target: DEFAULT_TARGET.to_string(),
            show_loading_sections: true,
            json_output: None,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str::<Self>(&contents) {
                    Ok(mut config) => {
                        config.validate();
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Configuration file path: `$CRAFTPLAN_CONFIG`, else `craftplan.toml`.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Replace blank values with their defaults.
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if self.recipe_path.as_os_str().is_empty() {
            self.recipe_path = defaults.recipe_path;
        }
        if self.inventory_path.as_os_str().is_empty() {
            self.inventory_path = defaults.inventory_path;
        }
        if self.default_target.trim().is_empty() {
            self.default_target = defaults.default_target;
        }
        if self
            .json_output
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.json_output = None;
        }
    }

    /// Target to plan for: the command line value if given, else the default.
    #[must_use]
    pub fn target<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.default_target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.default_target, "Wildcards");
        assert_eq!(config.recipe_path, PathBuf::from("recipeData.csv"));
        assert_eq!(config.inventory_path, PathBuf::from("inventoryData.csv"));
        assert!(config.show_loading_sections);
        assert!(config.json_output.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PlannerConfig {
            recipe_path: PathBuf::new(),
            default_target: "   ".to_string(),
            json_output: Some(PathBuf::new()),
            ..PlannerConfig::default()
        };

        config.validate();

        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_config_full_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("craftplan.toml");

        let config = PlannerConfig {
            default_target: "Moonstones".to_string(),
            show_loading_sections: false,
            json_output: Some(PathBuf::from("plan.json")),
            ..PlannerConfig::default()
        };
        let contents = toml::to_string_pretty(&config).expect("serialize");
        fs::write(&config_path, contents).expect("write");

        let loaded = PlannerConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("craftplan.toml");
        fs::write(&config_path, "default_target = \"Runes\"\n").expect("write");

        let loaded = PlannerConfig::load_from(&config_path);
        assert_eq!(loaded.default_target, "Runes");
        assert_eq!(loaded.recipe_path, PathBuf::from(DEFAULT_RECIPE_PATH));
    }

    #[test]
    fn test_config_invalid_file_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("craftplan.toml");
        fs::write(&config_path, "default_target = [").expect("write");

        assert_eq!(PlannerConfig::load_from(&config_path), PlannerConfig::default());
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = PlannerConfig::load_from("/nonexistent/path/craftplan.toml");
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_target_override() {
        let config = PlannerConfig::default();
        assert_eq!(config.target(None), "Wildcards");
        assert_eq!(config.target(Some("")), "Wildcards");
        assert_eq!(config.target(Some("Runes")), "Runes");
    }
}

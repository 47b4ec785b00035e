use crate::error::{AdvisorError, Result};
use crate::logic::{CropCatalog, DEFAULT_MIN_CONFIDENCE, DEFAULT_UPCOMING_DAYS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub advisor: AdvisorConfig,
    /// YAML crop list replacing the built-in seed catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default = "default_upcoming_window_days")]
    pub upcoming_window_days: u32,
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_upcoming_window_days() -> u32 {
    DEFAULT_UPCOMING_DAYS
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            upcoming_window_days: default_upcoming_window_days(),
        }
    }
}

impl Config {
    /// Load from `config_override`, else the first config.yaml found in the
    /// standard locations, else built-in defaults.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if !p.exists() => {
                return Err(AdvisorError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )))
            }
            Some(p) => p.clone(),
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config: {}", e)))?;

        tracing::debug!(path = %config_path.display(), "Loading configuration");
        let mut config = Self::from_yaml_str(&config_str)?;
        if let Some(dir) = config_path.parent() {
            config.resolve_relative(dir);
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.advisor.min_confidence) {
            return Err(AdvisorError::Config(format!(
                "advisor.min_confidence must be between 0 and 100 (got {})",
                self.advisor.min_confidence
            )));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("krishimitra").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// The crop catalog to use: the configured YAML file, or the seed set.
    pub fn catalog(&self) -> Result<CropCatalog> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = CropCatalog::from_yaml_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    crops = catalog.len(),
                    "Loaded custom crop catalog"
                );
                Ok(catalog)
            }
            None => Ok(CropCatalog::default_seed()),
        }
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AdvisorError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("KRISHIMITRA_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine data directory".into()))?
            .join("krishimitra");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("krishimitra.db"))
    }

    pub fn resolve_relative(&mut self, base: &Path) {
        if let Some(path) = self.catalog_path.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.advisor.min_confidence, 60.0);
        assert_eq!(config.advisor.upcoming_window_days, 7);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.catalog().unwrap().len(), 8);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = Config::from_yaml_str("advisor:\n  min_confidence: 75.0\n").unwrap();
        assert_eq!(config.advisor.min_confidence, 75.0);
        assert_eq!(config.advisor.upcoming_window_days, 7);

        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config.advisor.min_confidence, 60.0);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let result = Config::from_yaml_str("advisor:\n  min_confidence: 120\n");
        assert!(matches!(result, Err(AdvisorError::Config(_))));
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("KRISHIMITRA_TEST_WINDOW", "14");
        let config =
            Config::from_yaml_str("advisor:\n  upcoming_window_days: ${KRISHIMITRA_TEST_WINDOW}\n")
                .unwrap();
        assert_eq!(config.advisor.upcoming_window_days, 14);
    }

    #[test]
    fn unset_env_var_is_left_in_place() {
        let out = Config::substitute_env_vars("path: ${KRISHIMITRA_TEST_UNSET_VAR}").unwrap();
        assert_eq!(out, "path: ${KRISHIMITRA_TEST_UNSET_VAR}");
    }

    #[test]
    fn missing_override_is_an_error() {
        let missing = PathBuf::from("/nonexistent/krishimitra/config.yaml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn relative_catalog_path_resolves_against_config_dir() {
        let mut config = Config::from_yaml_str("catalog_path: crops.yaml\n").unwrap();
        config.resolve_relative(Path::new("/etc/krishimitra"));
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/krishimitra/crops.yaml"))
        );
    }
}

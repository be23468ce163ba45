use serde::{Deserialize, Serialize};
use std::{fmt::Display, fs, path::Path};

use crate::ConfigError;

/// Settings for a cleaning run.
///
/// Every field has a default, so a config only needs to name what it changes:
///
/// ```
/// use dic_cleaner::CleanerConfig;
///
/// let config = CleanerConfig::from_config(r#"{ "output_extension": "lst" }"#).unwrap();
/// assert_eq!(config.delimiter, '/');
/// assert_eq!(config.output_extension, "lst");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub delimiter: char,
    pub input_extension: String,
    pub output_extension: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        CleanerConfig {
            delimiter: '/',
            input_extension: "dic".to_string(),
            output_extension: "txt".to_string(),
        }
    }
}

impl CleanerConfig {
    /// Loads a config from a `.json`/`.toml` file path, or parses `config`
    /// itself as inline JSON (then TOML, when enabled).
    pub fn from_config(config: &str) -> Result<CleanerConfig, ConfigError> {
        let parsed: CleanerConfig = if Path::new(config).exists() {
            let config_content = fs::read_to_string(config)?;
            if config.ends_with(".json") {
                serde_json::from_str(&config_content)?
            } else if config.ends_with(".toml") {
                #[cfg(feature = "toml_config")]
                {
                    toml::from_str(&config_content)?
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    return Err(ConfigError::TomlNotEnabled);
                }
            } else {
                return Err(ConfigError::UnsupportedFormat);
            }
        } else {
            // Try parsing as JSON first, then TOML if that fails and the feature is enabled
            match serde_json::from_str(config) {
                Ok(parsed) => parsed,
                Err(_json_err) => {
                    #[cfg(feature = "toml_config")]
                    {
                        toml::from_str(config)?
                    }
                    #[cfg(not(feature = "toml_config"))]
                    {
                        return Err(ConfigError::UnsupportedFormat);
                    }
                }
            }
        };
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for ext in [&self.input_extension, &self.output_extension] {
            if ext.is_empty() || ext.contains(['/', '\\']) {
                return Err(ConfigError::InvalidExtension(ext.clone()));
            }
        }
        Ok(())
    }
}

impl Display for CleanerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

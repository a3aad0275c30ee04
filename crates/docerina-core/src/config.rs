//! Generator configuration (`docerina.toml`) loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::doc::{DEFAULT_TITLE, SOURCE_EXTENSION};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "docerina.toml";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "api-docs/html";

/// Environment variable that replaces `output.dir`.
pub const OUTPUT_DIR_ENV: &str = "DOCERINA_OUTPUT_DIR";

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid source extension '{0}': {1}")]
    InvalidExtension(String, &'static str),

    #[error("output directory must not be empty")]
    EmptyOutputDir,
}

/// The complete docerina.toml configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocConfig {
    /// Where and how the site is written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Which files count as source modules.
    #[serde(default)]
    pub source: SourceConfig,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory, relative to the working directory.
    pub dir: PathBuf,

    /// Title of the index document.
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Extension of source modules, without the dot.
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: SOURCE_EXTENSION.to_string(),
        }
    }
}

impl DocConfig {
    /// Load `docerina.toml` from a directory, with environment overrides.
    ///
    /// Falls back to defaults if no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            Self::from_path(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|var| std::env::var(var).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through the given lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|d| !d.is_empty()) {
            self.output.dir = PathBuf::from(dir);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.source.extension;
        if ext.is_empty() {
            return Err(ConfigError::InvalidExtension(
                ext.clone(),
                "must not be empty",
            ));
        }
        if ext.starts_with('.') {
            return Err(ConfigError::InvalidExtension(
                ext.clone(),
                "must not start with '.'",
            ));
        }
        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = DocConfig::default();
        assert_eq!(config.output.dir, PathBuf::from("api-docs/html"));
        assert_eq!(config.output.title, "API Documentation");
        assert_eq!(config.source.extension, "bal");

        // Defaults match what the pipeline uses without a config
        assert_eq!(config.output.title, DEFAULT_TITLE);
        assert_eq!(config.source.extension, SOURCE_EXTENSION);
    }

    #[test]
    fn parse_partial_config() {
        let config = DocConfig::parse("[output]\ntitle = \"My APIs\"\n").unwrap();
        assert_eq!(config.output.title, "My APIs");
        assert_eq!(config.output.dir, PathBuf::from("api-docs/html"));
        assert_eq!(config.source.extension, "bal");
    }

    #[test]
    fn reject_unknown_fields() {
        let err = DocConfig::parse("[output]\nformat = \"pdf\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reject_dotted_extension() {
        let err = DocConfig::parse("[source]\nextension = \".bal\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExtension(_, _)));
    }

    #[test]
    fn env_override_replaces_output_dir() {
        let mut config = DocConfig::default();
        config.apply_env_overrides(|var| {
            (var == OUTPUT_DIR_ENV).then(|| "target/docs".to_string())
        });
        assert_eq!(config.output.dir, PathBuf::from("target/docs"));

        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.output.dir, PathBuf::from("target/docs"));
    }

    #[test]
    fn load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[output]\ndir = \"out\"\n[source]\nextension = \"balx\"\n",
        )
        .unwrap();

        let config = DocConfig::from_path(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.source.extension, "balx");
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DocConfig::load(dir.path()).unwrap();
        assert_eq!(config.source.extension, "bal");
    }
}

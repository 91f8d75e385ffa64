//! Pipeline configuration loading and validation for rankprep.
//!
//! Loads the pipeline description from `~/.rankprep/pipeline.toml` (or the
//! file named by `RANKPREP_CONFIG`). Each `[[components]]` entry names a
//! registered component through `class_name`; every other key in the entry
//! is handed to the component as a construction option.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rankprep_core::component::ComponentOptions;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "RANKPREP_CONFIG";

/// The root configuration structure.
///
/// Maps directly to `pipeline.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Components in pipeline order
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
}

/// One component entry of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Registry name of the component
    pub class_name: String,

    /// Optional unique handle for this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Everything else: construction options, unknown keys included
    #[serde(flatten)]
    pub options: ComponentOptions,
}

impl ComponentConfig {
    /// An entry with no options.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            id: None,
            options: ComponentOptions::new(),
        }
    }

    /// Set one construction option.
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The id if set, else the class name.
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.class_name)
    }
}

impl PipelineConfig {
    /// Load configuration from `$RANKPREP_CONFIG` or the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::resolve_path())
    }

    /// Load configuration from a specific file path.
    ///
    /// A missing file is not an error: the default pipeline is returned.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            components = config.components.len(),
            "Loaded pipeline config"
        );
        Ok(config)
    }

    /// The config file location: `$RANKPREP_CONFIG` if set, else
    /// `~/.rankprep/pipeline.toml`.
    pub fn resolve_path() -> PathBuf {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::config_dir().join("pipeline.toml"),
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".rankprep")
    }

    /// Find a component entry by id, falling back to class name.
    pub fn component(&self, name: &str) -> Option<&ComponentConfig> {
        self.components
            .iter()
            .find(|c| c.id.as_deref() == Some(name))
            .or_else(|| self.components.iter().find(|c| c.class_name == name))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_ids = HashSet::new();
        for (index, component) in self.components.iter().enumerate() {
            if component.class_name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "components[{index}]: class_name must not be empty"
                )));
            }

            if let Some(id) = &component.id {
                if !seen_ids.insert(id.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "duplicate component id '{id}'"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Generate the default pipeline TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            components: vec![
                ComponentConfig::new("compose_inputs_hybrid_ranker")
                    .with_option("context_depth", 1),
            ],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for rankprep_core::Error {
    fn from(err: ConfigError) -> Self {
        rankprep_core::Error::Config {
            message: err.to_string(),
        }
    }
}

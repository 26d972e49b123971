#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_MODEL_PATH: &str = "model_perm_best.json";

/// Effective run settings after merging the TOML file and command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub model_path: String,
    pub input_path: Option<String>,
    pub output_format: OutputFormat,
    pub output_path: Option<String>,
    pub verbose: bool,
    pub log_json: bool,
    pub monitor: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            input_path: None,
            output_format: OutputFormat::Text,
            output_path: None,
            verbose: false,
            log_json: false,
            monitor: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        let defaults = Self::default();

        Ok(Self {
            model_path: config
                .model_path()
                .map(str::to_string)
                .unwrap_or(defaults.model_path),
            input_path: config.input_path().map(str::to_string),
            output_format: config.output_format()?.unwrap_or(defaults.output_format),
            output_path: config.output_path().map(str::to_string),
            verbose: config.verbose(),
            log_json: config.log_json(),
            monitor: config.monitoring_enabled(),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("model_path", &self.model_path)?;
        if let Some(path) = &self.input_path {
            validate_path("input_path", path)?;
        }
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn input_path(&self) -> Option<&str> {
        self.input_path.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

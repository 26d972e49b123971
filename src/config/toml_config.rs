use crate::domain::model::OutputFormat;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_one_of, validate_path, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub model: ModelConfig,
    pub input: Option<InputConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PERM_MODEL_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn model_path(&self) -> Result<&str> {
        validate_required_field("model.path", &self.model.path).map(String::as_str)
    }

    pub fn input_path(&self) -> Option<&str> {
        self.input.as_ref().map(|input| input.path.as_str())
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        match self.output.as_ref().and_then(|o| o.format.as_deref()) {
            Some(format) => {
                validate_one_of("output.format", format, &OutputFormat::NAMES)?;
                format
                    .parse()
                    .map(Some)
                    .map_err(|message| EstimatorError::ConfigError { message })
            }
            None => Ok(None),
        }
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.model.path {
            validate_path("model.path", path)?;
        }

        if let Some(path) = self.input_path() {
            validate_path("input.path", path)?;
        }

        if let Some(path) = self.output_path() {
            validate_path("output.path", path)?;
        }

        self.output_format()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[model]
path = "models/perm.json"

[input]
path = "cases.csv"

[output]
format = "json"
path = "out/report.json"

[logging]
verbose = true

[monitoring]
enabled = true
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.model_path().unwrap(), "models/perm.json");
        assert_eq!(config.input_path(), Some("cases.csv"));
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Json));
        assert_eq!(config.output_path(), Some("out/report.json"));
        assert!(config.verbose());
        assert!(!config.log_json());
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_empty_config_is_valid_but_has_no_model() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.model_path(),
            Err(EstimatorError::MissingConfigError { .. })
        ));
        assert_eq!(config.output_format().unwrap(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PERM_ESTIMATOR_TEST_MODEL_DIR", "/opt/models");
        let config = TomlConfig::from_toml_str(
            "[model]\npath = \"${PERM_ESTIMATOR_TEST_MODEL_DIR}/perm.json\"\n[output]\npath = \"${PERM_ESTIMATOR_UNSET_VAR}/r.csv\"\n",
        )
        .unwrap();
        assert_eq!(config.model_path().unwrap(), "/opt/models/perm.json");
        assert_eq!(config.output_path(), Some("${PERM_ESTIMATOR_UNSET_VAR}/r.csv"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let config = TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(EstimatorError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = TomlConfig::from_toml_str("[model\npath = 1").unwrap_err();
        assert!(matches!(err, EstimatorError::ConfigValidationError { .. }));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Inference failed: {message}")]
    InferenceFailure { message: String },

    #[error("Failed to load model from '{path}': {message}")]
    ModelLoadError { path: String, message: String },

    #[error("Invalid input for '{field}' (value: {value}): {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}' (value: {value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Inference,
    Model,
    Input,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceFailure {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InferenceFailure { .. } => ErrorCategory::Inference,
            Self::ModelLoadError { .. } => ErrorCategory::Model,
            Self::InvalidInputError { .. } | Self::CsvError(_) => ErrorCategory::Input,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一請求失敗，程序繼續處理下一筆
            Self::InferenceFailure { .. } => ErrorSeverity::Medium,
            Self::ModelLoadError { .. } => ErrorSeverity::Critical,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Inference => {
                "Check that the model artifact was trained on the same ten feature columns"
            }
            ErrorCategory::Model => "Make sure the model file exists and is a valid JSON model artifact",
            ErrorCategory::Input => "Wage amounts must be non-negative numbers; fix the case and retry",
            ErrorCategory::Io => "Check file paths and permissions",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InferenceFailure { message } => {
                format!("An error occurred during scoring: {}", message)
            }
            Self::ModelLoadError { path, .. } => format!("Could not load the model at '{}'", path),
            Self::InvalidInputError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting: {}", field),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

use crate::domain::model::{FeatureValue, FeatureVector};
use crate::domain::ports::Classifier;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::validate_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Standardized numeric column: contributes `weight * (x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericEncoder {
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    pub weight: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// Binary logistic model over one-hot categorical levels and standardized
/// numeric columns, stored as JSON.
///
/// Category levels missing from the artifact contribute nothing, the same
/// as an encoder that ignores unknown categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    /// Class labels in probability column order.
    pub classes: Vec<String>,
    /// Column names the model expects, in order.
    pub features: Vec<String>,
    #[serde(default)]
    pub categorical: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub numeric: HashMap<String, NumericEncoder>,
    pub intercept: f64,
}

impl LogisticModel {
    /// 從 JSON 檔案載入模型
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        validate_path("model.path", &path_str)?;

        tracing::info!("📦 Loading model from: {}", path_str);
        let content =
            std::fs::read_to_string(&path).map_err(|e| EstimatorError::ModelLoadError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let model = Self::from_json_str(&content).map_err(|e| match e {
            EstimatorError::ModelLoadError { message, .. } => EstimatorError::ModelLoadError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        tracing::info!(
            "✅ Model '{}' loaded ({} features, classes: {:?})",
            model.name,
            model.features.len(),
            model.classes
        );
        Ok(model)
    }

    /// 從 JSON 字串解析模型並檢查結構
    pub fn from_json_str(content: &str) -> Result<Self> {
        let model: Self =
            serde_json::from_str(content).map_err(|e| EstimatorError::ModelLoadError {
                path: "<inline>".to_string(),
                message: format!("JSON parsing error: {}", e),
            })?;
        model.check()?;
        Ok(model)
    }

    pub fn positive_label(&self) -> Option<&str> {
        self.classes
            .get(crate::core::inference::POSITIVE_CLASS_INDEX)
            .map(String::as_str)
    }

    fn load_error(&self, message: String) -> EstimatorError {
        EstimatorError::ModelLoadError {
            path: self.name.clone(),
            message,
        }
    }

    fn check(&self) -> Result<()> {
        if self.classes.len() != 2 {
            return Err(self.load_error(format!(
                "a logistic model needs exactly 2 classes, found {}",
                self.classes.len()
            )));
        }

        if self.features.is_empty() {
            return Err(self.load_error("model declares no features".to_string()));
        }

        for name in &self.features {
            let categorical = self.categorical.contains_key(name);
            let numeric = self.numeric.get(name);
            match (categorical, numeric) {
                (true, None) => {}
                (false, Some(encoder)) => {
                    if !encoder.scale.is_finite() || encoder.scale == 0.0 {
                        return Err(self.load_error(format!(
                            "column {} has an unusable scale: {}",
                            name, encoder.scale
                        )));
                    }
                }
                (true, Some(_)) => {
                    return Err(self.load_error(format!(
                        "column {} is declared both categorical and numeric",
                        name
                    )))
                }
                (false, None) => {
                    return Err(self.load_error(format!("column {} has no encoder", name)))
                }
            }
        }

        if !self.intercept.is_finite() {
            return Err(self.load_error("intercept is not finite".to_string()));
        }

        // 類別順序未經驗證，只提示不修正
        let positive = self.positive_label().unwrap_or_default();
        if !positive.to_ascii_lowercase().starts_with("certif") {
            tracing::warn!(
                "⚠️ Model '{}' lists '{}' at probability column {}; it will still be reported as the approval probability",
                self.name,
                positive,
                crate::core::inference::POSITIVE_CLASS_INDEX
            );
        }

        Ok(())
    }

    fn column_score(&self, name: &str, value: FeatureValue<'_>) -> Result<f64> {
        match value {
            FeatureValue::Category(level) => match self.categorical.get(name) {
                Some(levels) => Ok(levels.get(level).copied().unwrap_or(0.0)),
                None => Err(EstimatorError::inference(format!(
                    "could not convert string '{}' to float in column {}",
                    level, name
                ))),
            },
            FeatureValue::Number(x) => match self.numeric.get(name) {
                Some(encoder) => Ok(encoder.weight * (x - encoder.mean) / encoder.scale),
                None => Err(EstimatorError::inference(format!(
                    "column {} expects a category, got number {}",
                    name, x
                ))),
            },
        }
    }
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let columns = features.columns();

        let names_match = columns.len() == self.features.len()
            && columns
                .iter()
                .zip(&self.features)
                .all(|((given, _), expected)| *given == expected.as_str());
        if !names_match {
            let given: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
            return Err(EstimatorError::inference(format!(
                "feature names mismatch: model expects {:?}, got {:?}",
                self.features, given
            )));
        }

        let mut logit = self.intercept;
        for (name, value) in columns {
            logit += self.column_score(name, value)?;
        }

        if !logit.is_finite() {
            return Err(EstimatorError::inference(format!(
                "non-finite decision value: {}",
                logit
            )));
        }

        let positive = 1.0 / (1.0 + (-logit).exp());
        Ok(vec![1.0 - positive, positive])
    }
}

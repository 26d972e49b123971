use crate::domain::model::{CaseInput, FeatureVector, OutputFormat};
use crate::utils::error::Result;
use std::sync::Arc;

/// Anything that can score a feature row as a distribution over classes.
///
/// Implementations are loaded once and only read afterwards.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Class probabilities in the model's class order.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        (**self).predict_proba(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        (**self).predict_proba(features)
    }
}

/// Reads cases from a source. The outer error means the source itself could
/// not be read; each inner result is one case, so a bad row does not hide
/// the others.
pub trait CaseSource {
    fn load_cases(&self) -> Result<Vec<Result<CaseInput>>>;
}

pub trait ConfigProvider {
    fn model_path(&self) -> &str;
    fn input_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
}

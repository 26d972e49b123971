use crate::domain::model::{ApprovalProbability, FeatureVector};
use crate::domain::ports::Classifier;
use crate::utils::error::{EstimatorError, Result};

/// Column of the probability matrix read as "certified".
///
/// Assumes the model's classes are ordered `[denied, certified]`; the JSON
/// loader warns when its labels say otherwise.
pub const POSITIVE_CLASS_INDEX: usize = 1;

/// Scores one feature row. Calls the classifier exactly once and folds every
/// failure into [`EstimatorError::InferenceFailure`].
pub fn invoke<C: Classifier + ?Sized>(
    classifier: &C,
    features: &FeatureVector,
) -> Result<ApprovalProbability> {
    let distribution = classifier.predict_proba(features).map_err(|e| match e {
        EstimatorError::InferenceFailure { .. } => e,
        other => EstimatorError::inference(other.to_string()),
    })?;

    let probability = distribution
        .get(POSITIVE_CLASS_INDEX)
        .copied()
        .ok_or_else(|| {
            EstimatorError::inference(format!(
                "model '{}' returned {} class probabilities, expected at least {}",
                classifier.name(),
                distribution.len(),
                POSITIVE_CLASS_INDEX + 1
            ))
        })?;

    ApprovalProbability::from_probability(probability).ok_or_else(|| {
        EstimatorError::inference(format!(
            "model '{}' returned an invalid probability: {}",
            classifier.name(),
            probability
        ))
    })
}

pub fn render(result: &Result<ApprovalProbability>) -> String {
    match result {
        Ok(probability) => format!("Estimated Approval Probability: {}", probability),
        Err(EstimatorError::InferenceFailure { message }) => {
            format!("An error occurred during scoring: {}", message)
        }
        Err(e) => e.user_friendly_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::derive_features;
    use crate::domain::model::CaseInput;

    struct Fixed(Vec<f64>);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict_proba(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
            Err(EstimatorError::ConfigError {
                message: "columns are missing: WAGE_RATIO".to_string(),
            })
        }
    }

    fn features() -> FeatureVector {
        derive_features(&CaseInput::default())
    }

    #[test]
    fn test_reads_positive_class_column() {
        let result = invoke(&Fixed(vec![0.127, 0.873]), &features()).unwrap();
        assert!((result.percent() - 87.3).abs() < 1e-9);
        assert_eq!(
            render(&Ok(result)),
            "Estimated Approval Probability: 87.3%"
        );
    }

    #[test]
    fn test_boundary_probabilities() {
        assert_eq!(invoke(&Fixed(vec![1.0, 0.0]), &features()).unwrap().percent(), 0.0);
        assert_eq!(invoke(&Fixed(vec![0.0, 1.0]), &features()).unwrap().percent(), 100.0);
    }

    #[test]
    fn test_classifier_error_becomes_inference_failure() {
        let result = invoke(&Broken, &features());
        match &result {
            Err(EstimatorError::InferenceFailure { message }) => {
                assert!(message.contains("WAGE_RATIO"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(render(&result).starts_with("An error occurred during scoring:"));
    }

    #[test]
    fn test_short_distribution_fails() {
        let result = invoke(&Fixed(vec![0.4]), &features());
        assert!(matches!(result, Err(EstimatorError::InferenceFailure { .. })));
    }

    #[test]
    fn test_out_of_range_probability_fails() {
        assert!(invoke(&Fixed(vec![0.0, 1.5]), &features()).is_err());
        assert!(invoke(&Fixed(vec![0.0, f64::NAN]), &features()).is_err());
    }
}

use crate::core::features::derive_features;
use crate::core::inference::{invoke, render};
use crate::domain::model::{ApprovalProbability, CaseInput, FeatureVector};
use crate::domain::ports::Classifier;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Outcome of scoring one case in a batch.
#[derive(Debug)]
pub struct ScoredCase {
    /// 1-based position of the case in its source
    pub case_id: usize,
    /// `None` when the case was rejected before derivation
    pub features: Option<FeatureVector>,
    pub outcome: Result<ApprovalProbability>,
}

impl ScoredCase {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn message(&self) -> String {
        render(&self.outcome)
    }
}

/// Runs validate → derive → invoke against a classifier loaded once at startup.
pub struct Estimator<C: Classifier> {
    classifier: C,
}

impl<C: Classifier> Estimator<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn estimate(&self, case: &CaseInput) -> Result<ApprovalProbability> {
        case.validate()?;
        let features = derive_features(case);
        self.estimate_features(&features)
    }

    pub fn estimate_features(&self, features: &FeatureVector) -> Result<ApprovalProbability> {
        let result = invoke(&self.classifier, features);
        match &result {
            Ok(probability) => {
                tracing::debug!("Model '{}' scored {}", self.classifier.name(), probability)
            }
            Err(e) => tracing::warn!("❌ Scoring failed: {}", e),
        }
        result
    }

    pub fn score(&self, case_id: usize, case: &CaseInput) -> ScoredCase {
        if let Err(e) = case.validate() {
            tracing::warn!("❌ Case {} rejected: {}", case_id, e);
            return ScoredCase {
                case_id,
                features: None,
                outcome: Err(e),
            };
        }

        let features = derive_features(case);
        let outcome = self.estimate_features(&features);
        ScoredCase {
            case_id,
            features: Some(features),
            outcome,
        }
    }

    /// 依序處理每一筆；單筆失敗不影響其他案件
    pub fn estimate_batch(&self, cases: &[CaseInput]) -> Vec<ScoredCase> {
        tracing::info!("Scoring {} case(s) with model '{}'", cases.len(), self.classifier.name());

        let scored: Vec<ScoredCase> = cases
            .iter()
            .enumerate()
            .map(|(i, case)| self.score(i + 1, case))
            .collect();

        Self::log_summary(&scored);
        scored
    }

    /// Same as [`Self::estimate_batch`], for rows straight from a
    /// [`CaseSource`](crate::domain::ports::CaseSource); unreadable rows keep
    /// their position and become error outcomes.
    pub fn estimate_rows(&self, rows: Vec<Result<CaseInput>>) -> Vec<ScoredCase> {
        tracing::info!("Scoring {} case(s) with model '{}'", rows.len(), self.classifier.name());

        let scored: Vec<ScoredCase> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| match row {
                Ok(case) => self.score(i + 1, &case),
                Err(e) => {
                    tracing::warn!("❌ Case {} unreadable: {}", i + 1, e);
                    ScoredCase {
                        case_id: i + 1,
                        features: None,
                        outcome: Err(e),
                    }
                }
            })
            .collect();

        Self::log_summary(&scored);
        scored
    }

    fn log_summary(scored: &[ScoredCase]) {
        let failed = scored.iter().filter(|s| !s.is_success()).count();
        tracing::info!(
            "✅ Scored {} case(s), {} failed",
            scored.len() - failed,
            failed
        );
    }
}

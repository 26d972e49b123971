pub mod estimator;
pub mod features;
pub mod inference;

pub use crate::domain::model::{ApprovalProbability, CaseInput, FeatureVector};
pub use crate::domain::ports::{CaseSource, Classifier, ConfigProvider};
pub use crate::utils::error::Result;

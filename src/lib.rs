pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::Settings;

pub use crate::adapters::LogisticModel;
pub use crate::core::{estimator::Estimator, features::derive_features, inference::invoke};
pub use crate::domain::model::{ApprovalProbability, CaseInput, FeatureVector};
pub use crate::domain::ports::Classifier;
pub use crate::utils::error::{EstimatorError, Result};

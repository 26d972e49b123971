// Adapters layer: concrete implementations for external systems (model files, case files, reports).

pub mod case_file;
pub mod model_artifact;
pub mod report;

pub use case_file::{case_source_for, CsvCaseFile, TomlCaseFile};
pub use model_artifact::LogisticModel;

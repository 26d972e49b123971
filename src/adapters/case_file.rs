use crate::domain::model::CaseInput;
use crate::domain::ports::CaseSource;
use crate::utils::error::{EstimatorError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn unreadable_input(path: &Path, e: std::io::Error) -> EstimatorError {
    EstimatorError::InvalidInputError {
        field: "input.path".to_string(),
        value: path.display().to_string(),
        reason: format!("Cannot read case file: {}", e),
    }
}

#[derive(Debug, Deserialize)]
struct CaseDocument {
    #[serde(default)]
    case: CaseInput,
}

/// A single case stored as a `[case]` table; omitted fields take the form defaults.
#[derive(Debug, Clone)]
pub struct TomlCaseFile {
    path: PathBuf,
}

impl TomlCaseFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Result<CaseInput> {
        let document: CaseDocument =
            toml::from_str(content).map_err(|e| EstimatorError::InvalidInputError {
                field: "case".to_string(),
                value: String::new(),
                reason: format!("TOML parsing error: {}", e),
            })?;
        Ok(document.case)
    }
}

impl CaseSource for TomlCaseFile {
    fn load_cases(&self) -> Result<Vec<Result<CaseInput>>> {
        tracing::debug!("Reading case from {}", self.path.display());
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| unreadable_input(&self.path, e))?;
        Ok(vec![Self::parse(&content)])
    }
}

/// One case per row; the header names are the [`CaseInput`] field names.
#[derive(Debug, Clone)]
pub struct CsvCaseFile {
    path: PathBuf,
}

impl CsvCaseFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// 每一列各自解析；格式錯誤的列轉成該列的錯誤，讀取錯誤才中止
    pub fn parse<R: std::io::Read>(reader: R) -> Result<Vec<Result<CaseInput>>> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows = Vec::new();
        for (i, record) in reader.deserialize::<CaseInput>().enumerate() {
            match record {
                Ok(case) => rows.push(Ok(case)),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => rows.push(Err(EstimatorError::InvalidInputError {
                    field: format!("row {}", i + 1),
                    value: String::new(),
                    reason: e.to_string(),
                })),
            }
        }
        Ok(rows)
    }
}

impl CaseSource for CsvCaseFile {
    fn load_cases(&self) -> Result<Vec<Result<CaseInput>>> {
        tracing::debug!("Reading cases from {}", self.path.display());
        let file = std::fs::File::open(&self.path).map_err(|e| unreadable_input(&self.path, e))?;
        let rows = Self::parse(file)?;
        let rejected = rows.iter().filter(|row| row.is_err()).count();
        tracing::info!(
            "📥 Loaded {} case(s) from {}, {} unreadable",
            rows.len() - rejected,
            self.path.display(),
            rejected
        );
        Ok(rows)
    }
}

/// 依副檔名選擇案件來源
pub fn case_source_for(path: &str) -> Result<Box<dyn CaseSource>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => Ok(Box::new(TomlCaseFile::new(path))),
        Some("csv") => Ok(Box::new(CsvCaseFile::new(path))),
        _ => Err(EstimatorError::InvalidConfigValueError {
            field: "input.path".to_string(),
            value: path.to_string(),
            reason: "Unsupported case file. Allowed extensions: toml, csv".to_string(),
        }),
    }
}

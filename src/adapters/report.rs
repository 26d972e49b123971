use crate::core::estimator::ScoredCase;
use crate::domain::model::{FeatureVector, OutputFormat, FEATURE_COLUMNS};
use crate::utils::error::{EstimatorError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    case_id: usize,
    features: Option<&'a FeatureVector>,
    probability_percent: Option<f64>,
    error: Option<String>,
    scored_at: String,
}

/// Rounds to the single decimal shown to users.
fn display_percent(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

fn error_text(scored: &ScoredCase) -> Option<String> {
    scored.outcome.as_ref().err().map(|_| scored.message())
}

pub fn render_report(
    scored: &[ScoredCase],
    format: OutputFormat,
    scored_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(scored)),
        OutputFormat::Json => render_json(scored, scored_at),
        OutputFormat::Csv => render_csv(scored),
    }
}

fn render_text(scored: &[ScoredCase]) -> String {
    // 單筆案件只輸出結果本身
    if let [single] = scored {
        return format!("{}\n", single.message());
    }

    scored
        .iter()
        .map(|s| format!("Case {}: {}\n", s.case_id, s.message()))
        .collect()
}

fn render_json(scored: &[ScoredCase], scored_at: DateTime<Utc>) -> Result<String> {
    let timestamp = scored_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let rows: Vec<JsonRow<'_>> = scored
        .iter()
        .map(|s| JsonRow {
            case_id: s.case_id,
            features: s.features.as_ref(),
            probability_percent: s.outcome.as_ref().ok().map(|p| display_percent(p.percent())),
            error: error_text(s),
            scored_at: timestamp.clone(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

fn render_csv(scored: &[ScoredCase]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["case_id"];
    header.extend(FEATURE_COLUMNS);
    header.extend(["probability_percent", "error"]);
    writer.write_record(&header)?;

    for s in scored {
        let mut record = vec![s.case_id.to_string()];
        match &s.features {
            Some(features) => {
                record.extend(features.columns().iter().map(|(_, value)| value.to_string()))
            }
            None => record.extend(FEATURE_COLUMNS.iter().map(|_| String::new())),
        }
        record.push(
            s.outcome
                .as_ref()
                .map(|p| format!("{:.1}", p.percent()))
                .unwrap_or_default(),
        );
        record.push(error_text(s).unwrap_or_default());
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EstimatorError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| EstimatorError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// 寫入檔案，未指定路徑時輸出到 stdout
pub fn write_report(content: &str, output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)?;
            tracing::info!("📁 Report saved to: {}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

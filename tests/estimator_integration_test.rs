use anyhow::Result;
use perm_estimator::adapters::report::{render_report, write_report};
use perm_estimator::adapters::{case_source_for, CsvCaseFile};
use perm_estimator::domain::model::{OutputFormat, OwnershipInterest, PayUnit};
use perm_estimator::domain::ports::CaseSource;
use perm_estimator::{
    derive_features, invoke, CaseInput, Classifier, Estimator, EstimatorError, FeatureVector,
    LogisticModel,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn demo_model() -> LogisticModel {
    LogisticModel::from_file(demo_path("model_perm_best.json")).unwrap()
}

#[test]
fn test_demo_model_scores_default_case() {
    let estimator = Estimator::new(demo_model());
    let probability = estimator.estimate(&CaseInput::default()).unwrap();

    assert!(probability.percent() > 0.0 && probability.percent() < 100.0);
    let rendered = probability.to_string();
    let decimals = rendered.trim_end_matches('%').split('.').nth(1).unwrap();
    assert_eq!(decimals.len(), 1);
}

#[test]
fn test_ownership_interest_lowers_probability() {
    let estimator = Estimator::new(demo_model());
    let base = estimator.estimate(&CaseInput::default()).unwrap();
    let owner = estimator
        .estimate(&CaseInput {
            ownership_interest: OwnershipInterest::Y,
            ..CaseInput::default()
        })
        .unwrap();
    assert!(owner < base);
}

#[test]
fn test_toml_case_matches_default_case() {
    let source = case_source_for(demo_path("case.toml").to_str().unwrap()).unwrap();
    let cases = source.load_cases().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].as_ref().unwrap(), &CaseInput::default());
}

#[test]
fn test_hourly_scenario_features() {
    let case = CaseInput {
        pw_wage_amount: 50.0,
        pw_wage_unit: PayUnit::Hour,
        wage_offer_from: 55.0,
        wage_offer_to: 55.0,
        wage_offer_unit: PayUnit::Hour,
        ..CaseInput::default()
    };
    let features = derive_features(&case);
    // 類別欄位原樣帶入
    assert_eq!(features.pw_soc_code(), "15-1252");
    assert_eq!(features.naics_code(), "5415");
    assert_eq!(features.worksite_state(), "CA");
    assert_eq!(features.pw_wage_annual(), 104_000.0);
    assert_eq!(features.offer_wage_annual(), 114_400.0);
    assert!((features.wage_ratio() - 1.1).abs() < 1e-9);
}

/// Fails on the first call only.
struct FailsOnce {
    calls: AtomicUsize,
}

impl Classifier for FailsOnce {
    fn name(&self) -> &str {
        "fails-once"
    }

    fn predict_proba(&self, _features: &FeatureVector) -> perm_estimator::Result<Vec<f64>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(EstimatorError::inference("internal numerical fault"));
        }
        Ok(vec![0.4, 0.6])
    }
}

#[test]
fn test_failed_inference_does_not_stop_later_requests() {
    let estimator = Estimator::new(FailsOnce {
        calls: AtomicUsize::new(0),
    });

    let first = estimator.estimate(&CaseInput::default());
    assert!(matches!(first, Err(EstimatorError::InferenceFailure { .. })));

    let second = estimator.estimate(&CaseInput::default()).unwrap();
    assert_eq!(second.to_string(), "60.0%");
}

#[test]
fn test_model_is_shared_read_only() {
    let model = Arc::new(demo_model());
    let first = Estimator::new(Arc::clone(&model));
    let second = Estimator::new(Arc::clone(&model));

    let a = first.estimate(&CaseInput::default()).unwrap();
    let b = second.estimate(&CaseInput::default()).unwrap();
    assert_eq!(a, b);

    let direct = invoke(model.as_ref(), &derive_features(&CaseInput::default())).unwrap();
    assert_eq!(a, direct);
}

#[test]
fn test_missing_model_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = LogisticModel::from_file(temp_dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, EstimatorError::ModelLoadError { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_schema_mismatched_artifact_fails_per_request() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let model_path = temp_dir.path().join("old_model.json");

    // 舊版模型缺少 WAGE_RATIO 欄位
    let mut artifact: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(demo_path("model_perm_best.json"))?)?;
    artifact["features"].as_array_mut().unwrap().pop();
    std::fs::write(&model_path, artifact.to_string())?;

    let estimator = Estimator::new(LogisticModel::from_file(&model_path)?);
    let scored = estimator.estimate_batch(&[CaseInput::default(), CaseInput::default()]);

    assert_eq!(scored.len(), 2);
    for s in &scored {
        assert!(s
            .message()
            .starts_with("An error occurred during scoring: feature names mismatch"));
    }
    Ok(())
}

#[test]
fn test_csv_batch_to_json_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input_path = temp_dir.path().join("cases.csv");
    std::fs::copy(demo_path("cases.csv"), &input_path)?;
    let mut extra = std::fs::read_to_string(&input_path)?;
    extra.push_str("15-1252,5415,,Fortnight,Bachelor's,CA,100,100,Year,N\n");
    extra.push_str("15-1252,5415,-5,Year,Bachelor's,CA,100,100,Year,N\n");
    extra.push_str("15-1252,5415,115000,Year,Bachelor's,CA,130000,140000,Year,N\n");
    std::fs::write(&input_path, extra)?;

    let cases = CsvCaseFile::new(&input_path).load_cases()?;
    assert_eq!(cases.len(), 7);

    let estimator = Estimator::new(demo_model());
    let scored = estimator.estimate_rows(cases);

    let report = render_report(&scored, OutputFormat::Json, chrono::Utc::now())?;
    let report_path = temp_dir.path().join("out").join("report.json");
    write_report(&report, Some(report_path.to_str().unwrap()))?;

    let rows: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report_path)?)?;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 7);

    // 時薪案件：104000 與 114400
    assert_eq!(rows[1]["features"]["PW_WAGE_ANNUAL"], 104000.0);
    assert_eq!(rows[1]["features"]["OFFER_WAGE_ANNUAL"], 114400.0);
    // 零薪資時比率固定為 1.0
    assert_eq!(rows[2]["features"]["WAGE_RATIO"], 1.0);

    for row in &rows[..4] {
        let percent = row["probability_percent"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&percent));
        assert!(row["error"].is_null());
    }

    // 無法解析的列保留位置，後面的案件照常評分
    assert_eq!(rows[4]["case_id"], 5);
    assert!(rows[4]["features"].is_null());
    assert!(rows[4]["error"].as_str().unwrap().contains("row 5"));

    assert!(rows[5]["probability_percent"].is_null());
    assert!(rows[5]["error"]
        .as_str()
        .unwrap()
        .contains("pw_wage_amount"));

    assert_eq!(rows[6]["case_id"], 7);
    assert!(rows[6]["error"].is_null());
    assert_eq!(rows[6]["probability_percent"], rows[0]["probability_percent"]);
    Ok(())
}

use anyhow::Context;
use clap::Parser;
use perm_estimator::adapters::{case_source_for, report};
use perm_estimator::domain::ports::ConfigProvider;
use perm_estimator::utils::error::{EstimatorError, ErrorSeverity};
use perm_estimator::utils::{logger, monitor::RunMonitor, validation::Validate};
use perm_estimator::{CaseInput, CliConfig, Estimator, LogisticModel};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 單筆評分失敗
        ErrorSeverity::High => 1,     // 輸入或設定錯誤
        ErrorSeverity::Critical => 3, // 模型或系統錯誤
    }
}

fn fail(e: &EstimatorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔錯誤時日誌尚未初始化，直接輸出到 stderr
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    if settings.log_json {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting perm-estimator");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let mut monitor = RunMonitor::new(settings.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 Process monitoring enabled");
    }

    // 模型只在啟動時載入一次
    let model = LogisticModel::from_file(settings.model_path()).unwrap_or_else(|e| fail(&e));
    let estimator = Estimator::new(model);
    monitor.log_stats("Model loaded");

    let rows = match settings.input_path() {
        Some(path) => case_source_for(path)
            .and_then(|source| source.load_cases())
            .unwrap_or_else(|e| fail(&e)),
        None => {
            tracing::info!("No input file given, scoring the default case");
            vec![Ok(CaseInput::default())]
        }
    };

    let scored = estimator.estimate_rows(rows);
    monitor.log_stats("Scoring complete");

    tracing::debug!("Rendering {} report", settings.output_format().as_str());
    let content = report::render_report(&scored, settings.output_format(), chrono::Utc::now())
        .context("failed to render report")?;
    report::write_report(&content, settings.output_path())
        .context("failed to write report")?;

    let worst = scored
        .iter()
        .filter_map(|s| s.outcome.as_ref().err())
        .map(|e| e.severity())
        .max();
    if let Some(severity) = worst {
        tracing::warn!("⚠️ Some cases could not be scored");
        std::process::exit(exit_code(severity));
    }

    Ok(())
}

use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "perm-estimator")]
#[command(about = "Estimate the certification probability of PERM cases with a pre-trained model")]
pub struct CliConfig {
    /// Path to the JSON model artifact (default: model_perm_best.json)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Case file to score: a .toml single case or a .csv batch
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format: text, json or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Optional TOML settings file; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

impl CliConfig {
    /// 載入設定檔（若有）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(model) = &self.model {
            settings.model_path = model.clone();
        }
        if let Some(input) = &self.input {
            settings.input_path = Some(input.clone());
        }
        if let Some(format) = self.format {
            settings.output_format = format;
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }
        settings.verbose |= self.verbose;
        settings.log_json |= self.log_json;
        settings.monitor |= self.monitor;
        settings
    }
}

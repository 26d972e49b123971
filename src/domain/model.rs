use crate::utils::error::Result as EstimatorResult;
use crate::utils::validation::{validate_wage_amount, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names the classifier was trained on, in input order.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "PW_SOC_CODE",
    "NAICS_CODE",
    "PW_UNIT_OF_PAY",
    "WAGE_OFFER_UNIT_OF_PAY",
    "MINIMUM_EDUCATION",
    "WORKSITE_STATE",
    "FW_OWNERSHIP_INTEREST",
    "PW_WAGE_ANNUAL",
    "OFFER_WAGE_ANNUAL",
    "WAGE_RATIO",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PayUnit {
    #[default]
    Year,
    Hour,
    Month,
    Week,
}

impl PayUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            PayUnit::Year => "Year",
            PayUnit::Hour => "Hour",
            PayUnit::Month => "Month",
            PayUnit::Week => "Week",
        }
    }

    /// 換算成年薪的固定倍數
    pub fn annual_multiplier(self) -> f64 {
        match self {
            PayUnit::Year => 1.0,
            PayUnit::Hour => 2080.0,
            PayUnit::Week => 52.0,
            PayUnit::Month => 12.0,
        }
    }
}

impl fmt::Display for PayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum education requirement, serialized with the labels used in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "High School", alias = "HighSchool")]
    HighSchool,
    #[default]
    #[serde(rename = "Bachelor's", alias = "Bachelor")]
    Bachelor,
    #[serde(rename = "Master's", alias = "Master")]
    Master,
    Doctorate,
}

impl Education {
    pub fn as_str(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Bachelor => "Bachelor's",
            Education::Master => "Master's",
            Education::Doctorate => "Doctorate",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OwnershipInterest {
    Y,
    #[default]
    N,
}

impl OwnershipInterest {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnershipInterest::Y => "Y",
            OwnershipInterest::N => "N",
        }
    }
}

/// Raw case attributes as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseInput {
    pub pw_soc_code: String,
    pub naics_code: String,
    pub pw_wage_amount: f64,
    pub pw_wage_unit: PayUnit,
    pub min_education: Education,
    pub worksite_state: String,
    pub wage_offer_from: f64,
    pub wage_offer_to: f64,
    pub wage_offer_unit: PayUnit,
    pub ownership_interest: OwnershipInterest,
}

impl Default for CaseInput {
    fn default() -> Self {
        Self {
            pw_soc_code: "15-1252".to_string(),
            naics_code: "5415".to_string(),
            pw_wage_amount: 115_000.0,
            pw_wage_unit: PayUnit::Year,
            min_education: Education::Bachelor,
            worksite_state: "CA".to_string(),
            wage_offer_from: 130_000.0,
            wage_offer_to: 140_000.0,
            wage_offer_unit: PayUnit::Year,
            ownership_interest: OwnershipInterest::N,
        }
    }
}

// 只檢查數值範圍；類別欄位照原樣交給模型
impl Validate for CaseInput {
    fn validate(&self) -> EstimatorResult<()> {
        validate_wage_amount("pw_wage_amount", self.pw_wage_amount)?;
        validate_wage_amount("wage_offer_from", self.wage_offer_from)?;
        validate_wage_amount("wage_offer_to", self.wage_offer_to)?;
        Ok(())
    }
}

/// A single cell of the classifier input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Category(&'a str),
    Number(f64),
}

impl fmt::Display for FeatureValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Category(s) => f.write_str(s),
            FeatureValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Canonical classifier input derived from a [`CaseInput`].
///
/// Only [`crate::core::features::derive_features`] builds one, so the
/// numeric columns always agree with the categorical ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "PW_SOC_CODE")]
    pub(crate) pw_soc_code: String,
    #[serde(rename = "NAICS_CODE")]
    pub(crate) naics_code: String,
    #[serde(rename = "PW_UNIT_OF_PAY")]
    pub(crate) pw_unit_of_pay: PayUnit,
    #[serde(rename = "WAGE_OFFER_UNIT_OF_PAY")]
    pub(crate) wage_offer_unit_of_pay: PayUnit,
    #[serde(rename = "MINIMUM_EDUCATION")]
    pub(crate) minimum_education: Education,
    #[serde(rename = "WORKSITE_STATE")]
    pub(crate) worksite_state: String,
    #[serde(rename = "FW_OWNERSHIP_INTEREST")]
    pub(crate) fw_ownership_interest: OwnershipInterest,
    #[serde(rename = "PW_WAGE_ANNUAL")]
    pub(crate) pw_wage_annual: f64,
    #[serde(rename = "OFFER_WAGE_ANNUAL")]
    pub(crate) offer_wage_annual: f64,
    #[serde(rename = "WAGE_RATIO")]
    pub(crate) wage_ratio: f64,
}

impl FeatureVector {
    pub fn pw_soc_code(&self) -> &str {
        &self.pw_soc_code
    }

    pub fn naics_code(&self) -> &str {
        &self.naics_code
    }

    pub fn worksite_state(&self) -> &str {
        &self.worksite_state
    }

    pub fn pw_wage_annual(&self) -> f64 {
        self.pw_wage_annual
    }

    pub fn offer_wage_annual(&self) -> f64 {
        self.offer_wage_annual
    }

    pub fn wage_ratio(&self) -> f64 {
        self.wage_ratio
    }

    /// The named row in [`FEATURE_COLUMNS`] order.
    pub fn columns(&self) -> [(&'static str, FeatureValue<'_>); 10] {
        [
            (FEATURE_COLUMNS[0], FeatureValue::Category(&self.pw_soc_code)),
            (FEATURE_COLUMNS[1], FeatureValue::Category(&self.naics_code)),
            (FEATURE_COLUMNS[2], FeatureValue::Category(self.pw_unit_of_pay.as_str())),
            (
                FEATURE_COLUMNS[3],
                FeatureValue::Category(self.wage_offer_unit_of_pay.as_str()),
            ),
            (FEATURE_COLUMNS[4], FeatureValue::Category(self.minimum_education.as_str())),
            (FEATURE_COLUMNS[5], FeatureValue::Category(&self.worksite_state)),
            (
                FEATURE_COLUMNS[6],
                FeatureValue::Category(self.fw_ownership_interest.as_str()),
            ),
            (FEATURE_COLUMNS[7], FeatureValue::Number(self.pw_wage_annual)),
            (FEATURE_COLUMNS[8], FeatureValue::Number(self.offer_wage_annual)),
            (FEATURE_COLUMNS[9], FeatureValue::Number(self.wage_ratio)),
        ]
    }
}

/// Positive-class probability expressed as a percentage in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct ApprovalProbability {
    percent: f64,
}

impl ApprovalProbability {
    /// `None` unless `probability` is a finite value in [0, 1].
    pub fn from_probability(probability: f64) -> Option<Self> {
        if probability.is_finite() && (0.0..=1.0).contains(&probability) {
            Some(Self {
                percent: probability * 100.0,
            })
        } else {
            None
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl fmt::Display for ApprovalProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["text", "json", "csv"];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown output format '{}' (expected one of: {})",
                other,
                OutputFormat::NAMES.join(", ")
            )),
        }
    }
}

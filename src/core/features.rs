use crate::domain::model::{CaseInput, FeatureVector, PayUnit};

/// Normalizes a wage amount to a yearly figure.
pub fn to_annual(amount: f64, unit: PayUnit) -> f64 {
    amount * unit.annual_multiplier()
}

/// Builds the classifier row for a case.
///
/// Total for any input: negative amounts pass through unchanged, and a
/// non-positive prevailing wage yields a ratio of exactly `1.0`.
pub fn derive_features(case: &CaseInput) -> FeatureVector {
    let pw_wage_annual = to_annual(case.pw_wage_amount, case.pw_wage_unit);
    let offer_midpoint = (case.wage_offer_from + case.wage_offer_to) / 2.0;
    let offer_wage_annual = to_annual(offer_midpoint, case.wage_offer_unit);

    let wage_ratio = if pw_wage_annual > 0.0 {
        offer_wage_annual / pw_wage_annual
    } else {
        1.0
    };

    tracing::debug!(
        pw_wage_annual,
        offer_wage_annual,
        wage_ratio,
        "Derived wage features"
    );

    FeatureVector {
        pw_soc_code: case.pw_soc_code.clone(),
        naics_code: case.naics_code.clone(),
        pw_unit_of_pay: case.pw_wage_unit,
        wage_offer_unit_of_pay: case.wage_offer_unit,
        minimum_education: case.min_education,
        worksite_state: case.worksite_state.clone(),
        fw_ownership_interest: case.ownership_interest,
        pw_wage_annual,
        offer_wage_annual,
        wage_ratio,
    }
}

use crate::utils::error::{EstimatorError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| EstimatorError::MissingConfigError {
            field: field_name.to_string(),
        })
}

/// 工資金額必須是有限且非負的數值
pub fn validate_wage_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EstimatorError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(EstimatorError::InvalidInputError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Amount cannot be negative".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("model.path", "model_perm_best.json").is_ok());
        assert!(validate_path("model.path", "").is_err());
        assert!(validate_path("model.path", "   ").is_err());
        assert!(validate_path("model.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        let formats = ["text", "json", "csv"];
        assert!(validate_one_of("output.format", "json", &formats).is_ok());
        assert!(validate_one_of("output.format", "xml", &formats).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("x".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("model.path", &present).unwrap(), "x");
        assert!(matches!(
            validate_required_field("model.path", &missing),
            Err(EstimatorError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_wage_amount() {
        assert!(validate_wage_amount("pw_wage_amount", 0.0).is_ok());
        assert!(validate_wage_amount("pw_wage_amount", 115000.0).is_ok());
        assert!(validate_wage_amount("pw_wage_amount", -1.0).is_err());
        assert!(validate_wage_amount("pw_wage_amount", f64::NAN).is_err());
        assert!(validate_wage_amount("pw_wage_amount", f64::INFINITY).is_err());
    }
}

//! Per-field coercion from cell text to typed values.

use chrono::NaiveDate;

use crate::error::CoercionError;

/// Coerce an integer-like cell.
///
/// Float text with no fractional part (`"7.0"`) is accepted, as spreadsheet
/// exports often write whole-number ids that way.
pub fn coerce_integer(value: &str) -> Result<i64, CoercionError> {
    if let Ok(parsed) = value.parse::<i64>() {
        return Ok(parsed);
    }

    let invalid = || CoercionError::InvalidInteger {
        value: value.to_string(),
    };
    let float = value.parse::<f64>().map_err(|_| invalid())?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Ok(float as i64)
    } else {
        Err(invalid())
    }
}

/// Coerce an ISO `YYYY-MM-DD` date cell.
pub fn coerce_date(value: &str) -> Result<NaiveDate, CoercionError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CoercionError::InvalidDate {
        value: value.to_string(),
    })
}

/// Coerce a numeric cell.
///
/// Infinities (`inf`, or overflowing text like `1e400`) are accepted. `NaN`
/// is rejected since it is how a missing feature is represented.
pub fn coerce_float(value: &str) -> Result<f64, CoercionError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| CoercionError::InvalidFloat {
            value: value.to_string(),
        })
}

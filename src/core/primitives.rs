use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{StackError, StackResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> StackResult<f64> {
    value.to_f64().ok_or_else(|| {
        StackError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Integers up to this magnitude (2^53) convert to `f64` without rounding.
pub const MAX_EXACT_F64_INTEGER: i64 = 1 << 53;

/// Widens an integer stack value, rejecting magnitudes that would round.
pub fn integer_to_f64(value: i64, field_name: &str) -> StackResult<f64> {
    if value.unsigned_abs() > MAX_EXACT_F64_INTEGER as u64 {
        return Err(StackError::InvalidData(format!(
            "{field_name} {value} cannot be represented exactly as f64"
        )));
    }
    Ok(value as f64)
}

/// Canonical text form of a timestamp key (RFC 3339, millisecond precision, `Z` suffix).
#[must_use]
pub fn datetime_to_canonical(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonical text form of a float key.
///
/// Integral values print without a fractional part so `2.0` and `2` collide,
/// and `-0.0` folds into `0`.
#[must_use]
pub fn float_to_canonical(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

use std::fmt;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;

use crate::core::primitives::{
    datetime_to_canonical, decimal_to_f64, float_to_canonical, integer_to_f64,
};
use crate::error::{StackError, StackResult};

/// Raw value read off an observation by an axis accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(i64),
    Text(String),
    Decimal(Decimal),
    Time(DateTime<Utc>),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl FieldValue {
    /// Interprets this field as a stack key.
    #[must_use]
    pub fn into_key(self) -> StackKey {
        match self {
            Self::Number(value) => StackKey::Number(OrderedFloat(value)),
            Self::Integer(value) => StackKey::Integer(value),
            Self::Text(value) => StackKey::Text(value),
            Self::Decimal(value) => StackKey::Text(value.normalize().to_string()),
            Self::Time(value) => StackKey::Time(value),
        }
    }

    /// Interprets this field as a finite stack value.
    ///
    /// Integers beyond +/-2^53 and decimals outside `f64` range are rejected
    /// rather than rounded.
    pub fn to_value(&self) -> StackResult<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Integer(value) => integer_to_f64(*value, "integer value")?,
            Self::Decimal(value) => decimal_to_f64(*value, "decimal value")?,
            Self::Text(text) => {
                return Err(StackError::InvalidData(format!(
                    "text `{text}` is not a numeric value"
                )));
            }
            Self::Time(_) => {
                return Err(StackError::InvalidData(
                    "timestamp is not a numeric value".to_owned(),
                ));
            }
        };
        if !value.is_finite() {
            return Err(StackError::InvalidData(
                "stack value must be finite".to_owned(),
            ));
        }
        Ok(value)
    }
}

/// Categorical key shared by every dataset of a stack group.
///
/// Keys are identified by their canonical text form: `Integer(3)` and
/// `Text("3")` name the same domain slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StackKey {
    Text(String),
    Integer(i64),
    Number(OrderedFloat<f64>),
    Time(DateTime<Utc>),
}

impl StackKey {
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) => float_to_canonical(value.0),
            Self::Time(value) => datetime_to_canonical(*value),
        }
    }

    /// Returns `true` when both keys share a canonical form.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self == other || self.canonical() == other.canonical()
    }
}

impl fmt::Display for StackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<&str> for StackKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for StackKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for StackKey {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

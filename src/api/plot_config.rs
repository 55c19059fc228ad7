use serde::{Deserialize, Serialize};

use crate::core::StackOrientation;
use crate::error::{StackError, StackResult};

/// Public stacked-plot bootstrap configuration.
///
/// This type is serializable so host applications can persist/load plot setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPlotConfig {
    /// Stable plot-instance id used as owner when registering extents.
    pub owner_id: String,
    #[serde(default)]
    pub orientation: StackOrientation,
    #[serde(default = "default_anchored")]
    pub anchored: bool,
    /// Value synthesized for datasets lacking an observation at a domain key.
    #[serde(default = "default_missing_value")]
    pub missing_value: f64,
}

impl StackedPlotConfig {
    /// Creates a vertical, anchored config with a zero missing value.
    #[must_use]
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            orientation: StackOrientation::default(),
            anchored: default_anchored(),
            missing_value: default_missing_value(),
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: StackOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_anchored(mut self, anchored: bool) -> Self {
        self.anchored = anchored;
        self
    }

    #[must_use]
    pub fn with_missing_value(mut self, missing_value: f64) -> Self {
        self.missing_value = missing_value;
        self
    }

    pub fn validate(&self) -> StackResult<()> {
        if self.owner_id.trim().is_empty() {
            return Err(StackError::InvalidConfig(
                "owner id must not be empty".to_owned(),
            ));
        }
        validate_missing_value(self.missing_value)
    }
}

pub(super) fn validate_missing_value(missing_value: f64) -> StackResult<()> {
    if !missing_value.is_finite() {
        return Err(StackError::InvalidConfig(
            "missing value must be finite".to_owned(),
        ));
    }
    Ok(())
}

fn default_anchored() -> bool {
    true
}

fn default_missing_value() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_vertical_anchored_zero() {
        let config = StackedPlotConfig::new("plot-1");
        assert_eq!(config.orientation, StackOrientation::Vertical);
        assert!(config.anchored);
        assert_eq!(config.missing_value, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_blank_owner_and_non_finite_missing_value() {
        assert!(StackedPlotConfig::new("  ").validate().is_err());
        assert!(
            StackedPlotConfig::new("p")
                .with_missing_value(f64::NAN)
                .validate()
                .is_err()
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::core::field::{FieldValue, StackKey};
use crate::error::{StackError, StackResult};

/// Reads one axis field off an observation.
///
/// Accessors must be pure: the same observation always yields the same field.
pub type AxisAccessor<T> = dyn Fn(&T) -> StackResult<FieldValue>;

/// Which configured axis carries the categorical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StackOrientation {
    /// Keys come from `x`, stacked values from `y` (stacked columns).
    #[default]
    Vertical,
    /// Keys come from `y`, stacked values from `x` (stacked rows).
    Horizontal,
}

impl StackOrientation {
    #[must_use]
    pub fn key_axis(self) -> &'static str {
        match self {
            Self::Vertical => "x",
            Self::Horizontal => "y",
        }
    }

    #[must_use]
    pub fn value_axis(self) -> &'static str {
        match self {
            Self::Vertical => "y",
            Self::Horizontal => "x",
        }
    }
}

/// Transient `(key, value)` pair used while stacking.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    pub key: StackKey,
    pub value: f64,
}

impl AlignedRecord {
    #[must_use]
    pub fn new(key: impl Into<StackKey>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Turns observations into [`AlignedRecord`]s using the axis accessors
/// selected by orientation.
pub struct KeyValueExtractor<'a, T> {
    key_accessor: &'a AxisAccessor<T>,
    value_accessor: &'a AxisAccessor<T>,
    orientation: StackOrientation,
}

impl<'a, T> KeyValueExtractor<'a, T> {
    #[must_use]
    pub fn new(
        orientation: StackOrientation,
        x: &'a AxisAccessor<T>,
        y: &'a AxisAccessor<T>,
    ) -> Self {
        let (key_accessor, value_accessor) = match orientation {
            StackOrientation::Vertical => (x, y),
            StackOrientation::Horizontal => (y, x),
        };
        Self {
            key_accessor,
            value_accessor,
            orientation,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> StackOrientation {
        self.orientation
    }

    /// Extracts every observation of one dataset, in dataset order.
    ///
    /// The first accessor failure aborts extraction and is reported with the
    /// offending dataset and observation index.
    pub fn extract_dataset(
        &self,
        dataset: &str,
        observations: &[T],
    ) -> StackResult<Vec<AlignedRecord>> {
        observations
            .iter()
            .enumerate()
            .map(|(index, observation)| self.extract(dataset, index, observation))
            .collect()
    }

    fn extract(&self, dataset: &str, index: usize, observation: &T) -> StackResult<AlignedRecord> {
        let wrap = |axis: &'static str, err: StackError| StackError::Extraction {
            axis,
            dataset: dataset.to_owned(),
            index,
            message: err.to_string(),
        };

        let key = (self.key_accessor)(observation)
            .map_err(|err| wrap(self.orientation.key_axis(), err))?
            .into_key();
        let value = (self.value_accessor)(observation)
            .and_then(|field| field.to_value())
            .map_err(|err| wrap(self.orientation.value_axis(), err))?;

        Ok(AlignedRecord { key, value })
    }
}

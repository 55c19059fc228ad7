use serde::{Deserialize, Serialize};

use crate::core::extract::AlignedRecord;
use crate::core::offsets::StackOffsets;

/// Range of stacked values (`value + offset`) across a stack group.
///
/// Always contains zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for StackedExtent {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

impl StackedExtent {
    /// Widens an observed `(min, max)` range so it includes the zero baseline.
    #[must_use]
    pub fn including_zero(range: Option<(f64, f64)>) -> Self {
        match range {
            Some((min, max)) => Self {
                min: min.min(0.0),
                max: max.max(0.0),
            },
            None => Self::default(),
        }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains_zero(self) -> bool {
        self.min <= 0.0 && self.max >= 0.0
    }

    /// Returns `true` for the degenerate `[0, 0]` extent.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Raw `(min, max)` of `value + offset` over one dataset's real observations.
///
/// `None` for an empty dataset.
#[must_use]
pub fn dataset_stacked_range(records: &[AlignedRecord], offsets: &[f64]) -> Option<(f64, f64)> {
    records
        .iter()
        .zip(offsets)
        .map(|(record, offset)| record.value + offset)
        .fold(None, |acc, top| match acc {
            None => Some((top, top)),
            Some((min, max)) => Some((f64::min(min, top), f64::max(max, top))),
        })
}

/// Folds per-dataset ranges into the group extent.
///
/// Returns the per-dataset ranges alongside the zero-inclusive extent.
#[must_use]
pub fn track_extent(
    raw: &[Vec<AlignedRecord>],
    offsets: &StackOffsets,
) -> (Vec<Option<(f64, f64)>>, StackedExtent) {
    let per_dataset: Vec<Option<(f64, f64)>> = raw
        .iter()
        .zip(offsets.iter())
        .map(|(records, dataset_offsets)| dataset_stacked_range(records, dataset_offsets))
        .collect();

    let overall = per_dataset
        .iter()
        .flatten()
        .fold(None, |acc: Option<(f64, f64)>, &(min, max)| match acc {
            None => Some((min, max)),
            Some((lo, hi)) => Some((lo.min(min), hi.max(max))),
        });

    (per_dataset, StackedExtent::including_zero(overall))
}

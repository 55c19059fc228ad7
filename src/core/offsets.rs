use serde::{Deserialize, Serialize};

use crate::core::accumulate::StackedRecord;
use crate::core::domain::KeyDomain;
use crate::core::extract::AlignedRecord;
use crate::error::{StackError, StackResult};

/// Side table of stack offsets keyed by `(dataset index, observation index)`.
///
/// Observations are never annotated in place; renderers read their baseline
/// from here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackOffsets {
    per_dataset: Vec<Vec<f64>>,
}

impl StackOffsets {
    #[must_use]
    pub fn offset(&self, dataset: usize, observation: usize) -> Option<f64> {
        self.per_dataset.get(dataset)?.get(observation).copied()
    }

    #[must_use]
    pub fn dataset(&self, dataset: usize) -> Option<&[f64]> {
        self.per_dataset.get(dataset).map(Vec::as_slice)
    }

    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.per_dataset.len()
    }

    /// Total number of annotated observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_dataset.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.per_dataset.iter().map(Vec::as_slice)
    }
}

/// Picks each real observation's offset from the branch matching its sign.
///
/// `raw` holds the extracted records of the original observations (never the
/// synthesized fillers). Values strictly greater than zero take the positive
/// branch; zero and negatives take the negative branch.
pub fn merge_offsets(
    raw: &[Vec<AlignedRecord>],
    domain: &KeyDomain,
    positive: &[Vec<StackedRecord>],
    negative: &[Vec<StackedRecord>],
) -> StackResult<StackOffsets> {
    if positive.len() != raw.len() || negative.len() != raw.len() {
        return Err(StackError::InvalidData(format!(
            "stack branches cover {}/{} datasets, expected {}",
            positive.len(),
            negative.len(),
            raw.len()
        )));
    }

    let per_dataset = raw
        .iter()
        .enumerate()
        .map(|(dataset, records)| {
            records
                .iter()
                .map(|record| {
                    let branch = if record.value > 0.0 {
                        &positive[dataset]
                    } else {
                        &negative[dataset]
                    };
                    domain
                        .position(&record.key)
                        .and_then(|slot| branch.get(slot))
                        .filter(|stacked| stacked.key.same_slot(&record.key))
                        .map(|stacked| stacked.offset)
                        .ok_or_else(|| {
                            StackError::InvalidData(format!(
                                "key `{}` of dataset {dataset} is missing from the stack domain",
                                record.key
                            ))
                        })
                })
                .collect::<StackResult<Vec<f64>>>()
        })
        .collect::<StackResult<Vec<_>>>()?;

    Ok(StackOffsets { per_dataset })
}

use tracing::{debug, trace};

use crate::core::accumulate::accumulate_branch;
use crate::core::domain::KeyDomain;
use crate::core::extent::{StackedExtent, track_extent};
use crate::core::extract::{AlignedRecord, KeyValueExtractor};
use crate::core::offsets::{StackOffsets, merge_offsets};
use crate::core::sign::split_signs;
use crate::error::StackResult;

/// Everything a full recompute produces for one stack group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackLayout {
    pub domain: KeyDomain,
    pub offsets: StackOffsets,
    /// Raw `(min, max)` of `value + offset` per dataset, `None` when empty.
    pub dataset_ranges: Vec<Option<(f64, f64)>>,
    pub extent: StackedExtent,
    /// Missing-value records synthesized across all datasets.
    pub synthesized: usize,
    /// Observations ignored because an earlier one in the same dataset had the same key.
    pub collapsed_duplicates: usize,
}

impl StackLayout {
    #[must_use]
    pub fn offset(&self, dataset: usize, observation: usize) -> Option<f64> {
        self.offsets.offset(dataset, observation)
    }
}

/// Runs unify, split, accumulate, merge and extent tracking over extracted
/// records, in stacking order.
pub fn compute_stack_layout(
    raw: &[Vec<AlignedRecord>],
    missing_value: f64,
) -> StackResult<StackLayout> {
    let domain = KeyDomain::unify(raw);

    let mut synthesized = 0;
    let mut collapsed_duplicates = 0;
    let aligned: Vec<Vec<AlignedRecord>> = raw
        .iter()
        .enumerate()
        .map(|(index, records)| {
            let dataset = domain.align(records, missing_value);
            trace!(
                dataset = index,
                observations = records.len(),
                synthesized = dataset.synthesized,
                collapsed_duplicates = dataset.collapsed_duplicates,
                "aligned dataset to key domain"
            );
            if dataset.collapsed_duplicates > 0 {
                debug!(
                    dataset = index,
                    collapsed_duplicates = dataset.collapsed_duplicates,
                    "duplicate keys in dataset; keeping first occurrence"
                );
            }
            synthesized += dataset.synthesized;
            collapsed_duplicates += dataset.collapsed_duplicates;
            dataset.records
        })
        .collect();

    let branches = split_signs(&aligned);
    let positive = accumulate_branch(&branches.positive)?;
    let negative = accumulate_branch(&branches.negative)?;
    let offsets = merge_offsets(raw, &domain, &positive, &negative)?;
    let (dataset_ranges, extent) = track_extent(raw, &offsets);

    debug!(
        datasets = raw.len(),
        keys = domain.len(),
        synthesized,
        extent_min = extent.min,
        extent_max = extent.max,
        "computed stack layout"
    );

    Ok(StackLayout {
        domain,
        offsets,
        dataset_ranges,
        extent,
        synthesized,
        collapsed_duplicates,
    })
}

/// Extracts and stacks a group of datasets given as `(name, observations)`.
pub fn stack_datasets<T>(
    extractor: &KeyValueExtractor<'_, T>,
    datasets: &[(&str, &[T])],
    missing_value: f64,
) -> StackResult<StackLayout> {
    let raw = datasets
        .iter()
        .map(|(name, observations)| extractor.extract_dataset(name, observations))
        .collect::<StackResult<Vec<_>>>()?;
    compute_stack_layout(&raw, missing_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_sign_scenario() {
        let a = vec![AlignedRecord::new("a", 3.0), AlignedRecord::new("b", -2.0)];
        let b = vec![AlignedRecord::new("a", 4.0), AlignedRecord::new("b", 1.0)];
        let layout = compute_stack_layout(&[a, b], 0.0).expect("layout");

        let keys: Vec<&str> = layout.domain.canonical_keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(layout.offset(0, 0), Some(0.0));
        assert_eq!(layout.offset(1, 0), Some(3.0));
        assert_eq!(layout.offset(0, 1), Some(0.0));
        assert_eq!(layout.offset(1, 1), Some(0.0));
        assert_eq!(layout.extent.as_tuple(), (-2.0, 7.0));
    }

    #[test]
    fn empty_group_has_zero_extent() {
        let layout = compute_stack_layout(&[], 0.0).expect("layout");
        assert!(layout.domain.is_empty());
        assert!(layout.offsets.is_empty());
        assert_eq!(layout.extent.as_tuple(), (0.0, 0.0));
    }

    #[test]
    fn negative_values_stack_downward_independently() {
        let a = vec![AlignedRecord::new("k", -1.0)];
        let b = vec![AlignedRecord::new("k", 5.0)];
        let c = vec![AlignedRecord::new("k", -2.0)];
        let layout = compute_stack_layout(&[a, b, c], 0.0).expect("layout");
        assert_eq!(layout.offset(0, 0), Some(0.0));
        assert_eq!(layout.offset(1, 0), Some(0.0));
        assert_eq!(layout.offset(2, 0), Some(-1.0));
        assert_eq!(layout.extent.as_tuple(), (-3.0, 5.0));
    }

    #[test]
    fn missing_keys_are_counted() {
        let a = vec![AlignedRecord::new("x", 1.0), AlignedRecord::new("y", 1.0)];
        let b = vec![AlignedRecord::new("y", 2.0)];
        let layout = compute_stack_layout(&[a, b], 0.0).expect("layout");
        assert_eq!(layout.synthesized, 1);
        assert_eq!(layout.offset(1, 0), Some(1.0));
    }
}

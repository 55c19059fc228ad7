use crate::core::extract::AlignedRecord;
use crate::core::field::StackKey;
use crate::error::{StackError, StackResult};

/// Aligned record annotated with its cumulative baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedRecord {
    pub key: StackKey,
    pub value: f64,
    pub offset: f64,
}

/// Computes running offsets per key position across datasets in stacking order.
///
/// Dataset `0` is the baseline and gets offset `0` everywhere; dataset `i`
/// gets the sum of values of datasets `0..i` at the same position. Every
/// dataset must have the same length (one record per domain key).
pub fn accumulate_branch(branch: &[Vec<AlignedRecord>]) -> StackResult<Vec<Vec<StackedRecord>>> {
    let Some(width) = branch.first().map(Vec::len) else {
        return Ok(Vec::new());
    };
    if let Some(index) = branch.iter().position(|records| records.len() != width) {
        return Err(StackError::InvalidData(format!(
            "stack branch dataset {index} has {} records, expected {width}",
            branch[index].len()
        )));
    }

    let mut totals = vec![0.0; width];
    let stacked = branch
        .iter()
        .map(|records| {
            records
                .iter()
                .zip(totals.iter_mut())
                .map(|(record, total)| {
                    let offset = *total;
                    *total += record.value;
                    StackedRecord {
                        key: record.key.clone(),
                        value: record.value,
                        offset,
                    }
                })
                .collect()
        })
        .collect();

    Ok(stacked)
}

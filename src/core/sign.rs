use crate::core::extract::AlignedRecord;

#[must_use]
pub fn positive_part(value: f64) -> f64 {
    value.max(0.0)
}

#[must_use]
pub fn negative_part(value: f64) -> f64 {
    value.min(0.0)
}

/// Parallel positive/negative branches of a set of aligned datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct SignBranches {
    pub positive: Vec<Vec<AlignedRecord>>,
    pub negative: Vec<Vec<AlignedRecord>>,
}

/// Splits every aligned value into `max(0, v)` and `min(0, v)`; keys are kept.
#[must_use]
pub fn split_signs(aligned: &[Vec<AlignedRecord>]) -> SignBranches {
    let branch = |part: fn(f64) -> f64| -> Vec<Vec<AlignedRecord>> {
        aligned
            .iter()
            .map(|records| {
                records
                    .iter()
                    .map(|record| AlignedRecord {
                        key: record.key.clone(),
                        value: part(record.value),
                    })
                    .collect()
            })
            .collect()
    };

    SignBranches {
        positive: branch(positive_part),
        negative: branch(negative_part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_keys_and_clamps_values() {
        let aligned = vec![vec![
            AlignedRecord::new("a", 3.0),
            AlignedRecord::new("b", -2.0),
            AlignedRecord::new("c", 0.0),
        ]];
        let branches = split_signs(&aligned);
        let positive: Vec<f64> = branches.positive[0].iter().map(|r| r.value).collect();
        let negative: Vec<f64> = branches.negative[0].iter().map(|r| r.value).collect();
        assert_eq!(positive, vec![3.0, 0.0, 0.0]);
        assert_eq!(negative, vec![0.0, -2.0, 0.0]);
        assert_eq!(branches.negative[0][1].key, aligned[0][1].key);
    }
}

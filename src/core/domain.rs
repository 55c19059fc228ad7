use indexmap::IndexMap;

use crate::core::extract::AlignedRecord;
use crate::core::field::StackKey;

/// Ordered union of keys across a stack group.
///
/// Order is first-seen order while walking datasets in stacking order.
/// Identity is the canonical text form of each key; the first key seen for a
/// slot is kept as its representative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyDomain {
    keys: IndexMap<String, StackKey>,
}

/// One dataset rebuilt in [`KeyDomain`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedDataset {
    /// Exactly one record per domain key, in domain order.
    pub records: Vec<AlignedRecord>,
    /// Number of records synthesized with the missing value.
    pub synthesized: usize,
    /// Number of observations dropped because an earlier one shared their key.
    pub collapsed_duplicates: usize,
}

impl KeyDomain {
    /// Builds the domain from per-dataset records.
    #[must_use]
    pub fn unify(datasets: &[Vec<AlignedRecord>]) -> Self {
        let mut keys = IndexMap::new();
        for records in datasets {
            for (canonical, key) in dataset_key_set(records) {
                keys.entry(canonical).or_insert_with(|| key.clone());
            }
        }
        Self { keys }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Domain keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &StackKey> {
        self.keys.values()
    }

    /// Canonical forms of the domain keys, in order.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Position of `key` in the domain, matched by canonical form.
    #[must_use]
    pub fn position(&self, key: &StackKey) -> Option<usize> {
        self.keys.get_index_of(&key.canonical())
    }

    /// Back-fills a dataset with `missing_value` for absent keys and reorders it
    /// strictly by domain position.
    ///
    /// When several records share a canonical key only the first survives.
    #[must_use]
    pub fn align(&self, records: &[AlignedRecord], missing_value: f64) -> AlignedDataset {
        let mut first_match: IndexMap<String, &AlignedRecord> =
            IndexMap::with_capacity(records.len());
        let mut collapsed_duplicates = 0;
        for record in records {
            let canonical = record.key.canonical();
            if first_match.contains_key(&canonical) {
                collapsed_duplicates += 1;
                continue;
            }
            first_match.insert(canonical, record);
        }

        let mut synthesized = 0;
        let aligned = self
            .keys
            .iter()
            .map(|(canonical, domain_key)| match first_match.get(canonical) {
                Some(record) => (*record).clone(),
                None => {
                    synthesized += 1;
                    AlignedRecord {
                        key: domain_key.clone(),
                        value: missing_value,
                    }
                }
            })
            .collect();

        AlignedDataset {
            records: aligned,
            synthesized,
            collapsed_duplicates,
        }
    }
}

fn dataset_key_set(records: &[AlignedRecord]) -> IndexMap<String, &StackKey> {
    let mut out = IndexMap::with_capacity(records.len());
    for record in records {
        out.entry(record.key.canonical()).or_insert(&record.key);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(entries: &[(&str, f64)]) -> Vec<AlignedRecord> {
        entries
            .iter()
            .map(|(key, value)| AlignedRecord::new(*key, *value))
            .collect()
    }

    #[test]
    fn domain_is_first_seen_union_in_dataset_order() {
        let a = dataset(&[("b", 1.0), ("a", 2.0)]);
        let b = dataset(&[("c", 1.0), ("a", 3.0)]);
        let domain = KeyDomain::unify(&[a, b]);
        let keys: Vec<&str> = domain.canonical_keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn align_backfills_missing_keys_in_domain_order() {
        let a = dataset(&[("x", 1.0), ("y", 2.0)]);
        let b = dataset(&[("y", 5.0)]);
        let domain = KeyDomain::unify(&[a, b.clone()]);

        let aligned = domain.align(&b, 0.0);
        assert_eq!(aligned.synthesized, 1);
        assert_eq!(
            aligned.records,
            vec![AlignedRecord::new("x", 0.0), AlignedRecord::new("y", 5.0)]
        );
    }

    #[test]
    fn align_uses_configured_missing_value() {
        let a = dataset(&[("x", 1.0)]);
        let b = dataset(&[]);
        let domain = KeyDomain::unify(&[a, b.clone()]);
        assert_eq!(domain.align(&b, -1.5).records[0].value, -1.5);
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        let a = dataset(&[("x", 1.0), ("x", 9.0)]);
        let domain = KeyDomain::unify(std::slice::from_ref(&a));
        assert_eq!(domain.len(), 1);

        let aligned = domain.align(&a, 0.0);
        assert_eq!(aligned.collapsed_duplicates, 1);
        assert_eq!(aligned.records, vec![AlignedRecord::new("x", 1.0)]);
    }

    #[test]
    fn keys_with_same_canonical_form_share_a_slot() {
        let a = vec![AlignedRecord::new(StackKey::Integer(1), 2.0)];
        let b = vec![AlignedRecord::new("1", 3.0)];
        let domain = KeyDomain::unify(&[a, b.clone()]);
        assert_eq!(domain.len(), 1);
        assert_eq!(domain.keys().next(), Some(&StackKey::Integer(1)));

        let aligned = domain.align(&b, 0.0);
        assert_eq!(aligned.synthesized, 0);
        assert_eq!(aligned.records[0].key, StackKey::from("1"));
    }
}

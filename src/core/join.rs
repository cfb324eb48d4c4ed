//! Coordinate-keyed alignment of two sparse matrices

use crate::core::input::SparseEntry;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// How keys missing from one dataset are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Keep only pairs present in both datasets
    #[default]
    Inner,
    /// Keep every pair; the missing side gets IF = 0
    Outer,
}

impl JoinPolicy {
    pub fn from_include_zeros(include_zeros: bool) -> Self {
        if include_zeros {
            JoinPolicy::Outer
        } else {
            JoinPolicy::Inner
        }
    }

    pub fn is_outer(&self) -> bool {
        matches!(self, JoinPolicy::Outer)
    }
}

/// One aligned bin pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedPair {
    pub region1: u64,
    pub region2: u64,
    pub if1: f64,
    pub if2: f64,
}

/// Align two datasets on `(region1, region2)`
///
/// Output is sorted by key. Duplicate keys inside one dataset are summed
/// before alignment.
pub fn join_entries(
    first: &[SparseEntry],
    second: &[SparseEntry],
    policy: JoinPolicy,
) -> Vec<JoinedPair> {
    let first = collapse(1, first);
    let second = collapse(2, second);

    let joined: Vec<JoinedPair> = match policy {
        JoinPolicy::Inner => first
            .iter()
            .filter_map(|(&(region1, region2), &if1)| {
                second.get(&(region1, region2)).map(|&if2| JoinedPair {
                    region1,
                    region2,
                    if1,
                    if2,
                })
            })
            .collect(),
        JoinPolicy::Outer => {
            let mut union: BTreeMap<(u64, u64), (f64, f64)> =
                first.into_iter().map(|(key, if1)| (key, (if1, 0.0))).collect();
            for (key, if2) in second {
                union.entry(key).or_insert((0.0, 0.0)).1 = if2;
            }
            union
                .into_iter()
                .map(|((region1, region2), (if1, if2))| JoinedPair {
                    region1,
                    region2,
                    if1,
                    if2,
                })
                .collect()
        }
    };

    log::debug!("{:?} join produced {} aligned pairs", policy, joined.len());
    joined
}

/// Key a dataset by bin pair, summing duplicates
fn collapse(dataset: usize, entries: &[SparseEntry]) -> BTreeMap<(u64, u64), f64> {
    let mut map = BTreeMap::new();
    let mut duplicates = 0usize;

    for e in entries {
        match map.entry((e.region1, e.region2)) {
            Entry::Vacant(slot) => {
                slot.insert(e.freq);
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += e.freq;
                duplicates += 1;
            }
        }
    }

    if duplicates > 0 {
        log::warn!(
            "Dataset {} has {} duplicate bin pair(s); their frequencies were summed",
            dataset,
            duplicates
        );
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datasets() -> (Vec<SparseEntry>, Vec<SparseEntry>) {
        (
            vec![SparseEntry::new(0, 2000, 5.0), SparseEntry::new(0, 1000, 10.0)],
            vec![SparseEntry::new(0, 3000, 8.0), SparseEntry::new(0, 1000, 20.0)],
        )
    }

    #[test]
    fn test_inner_join() {
        let (a, b) = datasets();
        let joined = join_entries(&a, &b, JoinPolicy::Inner);
        assert_eq!(
            joined,
            vec![JoinedPair {
                region1: 0,
                region2: 1000,
                if1: 10.0,
                if2: 20.0
            }]
        );
    }

    #[test]
    fn test_outer_join_zero_fill() {
        let (a, b) = datasets();
        let joined = join_entries(&a, &b, JoinPolicy::Outer);
        let rows: Vec<(u64, f64, f64)> = joined.iter().map(|p| (p.region2, p.if1, p.if2)).collect();
        assert_eq!(rows, vec![(1000, 10.0, 20.0), (2000, 5.0, 0.0), (3000, 0.0, 8.0)]);
    }

    #[test]
    fn test_duplicates_are_summed() {
        let a = vec![SparseEntry::new(0, 1000, 1.0), SparseEntry::new(0, 1000, 2.5)];
        let b = vec![SparseEntry::new(0, 1000, 4.0)];
        let joined = join_entries(&a, &b, JoinPolicy::Inner);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].if1, 3.5);
    }

    #[test]
    fn test_empty_inner_join() {
        let a = vec![SparseEntry::new(0, 1000, 1.0)];
        let b = vec![SparseEntry::new(0, 2000, 1.0)];
        assert!(join_entries(&a, &b, JoinPolicy::Inner).is_empty());
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(JoinPolicy::from_include_zeros(true), JoinPolicy::Outer);
        assert_eq!(JoinPolicy::from_include_zeros(false), JoinPolicy::Inner);
        assert_eq!(JoinPolicy::default(), JoinPolicy::Inner);
    }
}

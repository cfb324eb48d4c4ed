//! Property-based tests for region exclusion
//!
//! Checks threshold semantics of bin removal against random exclusion sets.

use fast_hiccompare::core::{
    bin_overlap_fractions, create_hic_table, exclude_regions, ExclusionRegionSet, GenomicInterval,
    HicCompareError, HicInput, HicTable, SparseEntry, TableOptions, UsageError,
};
use proptest::prelude::*;
use std::collections::HashMap;

const BIN: u64 = 1000;

// ============================================================================
// Generators
// ============================================================================

/// Full upper triangle of a `bins`-bin matrix
fn full_table(bins: u64) -> HicTable {
    let entries: Vec<SparseEntry> = (0..bins)
        .flat_map(|i| {
            (i..bins).map(move |j| SparseEntry::new(i * BIN, j * BIN, (i + j + 1) as f64))
        })
        .collect();
    let options = TableOptions {
        chromosome: Some("chr1".to_string()),
        scale: false,
        ..TableOptions::default()
    };
    create_hic_table(
        HicInput::Triplets(entries.clone()),
        HicInput::Triplets(entries),
        &options,
    )
    .unwrap()
}

fn arb_interval() -> impl Strategy<Value = GenomicInterval> {
    (
        prop_oneof![Just("chr1"), Just("1"), Just("chr2")],
        0u64..20_000,
        1u64..3_000,
    )
        .prop_map(|(chrom, start, width)| GenomicInterval::new(chrom, start, start + width))
}

fn arb_regions() -> impl Strategy<Value = ExclusionRegionSet> {
    prop::collection::vec(arb_interval(), 0..8)
        .prop_map(|ivs| ExclusionRegionSet::from_intervals(ivs).unwrap())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: overlap fractions stay within [0, 1]
    #[test]
    fn test_fractions_bounded(regions in arb_regions()) {
        let table = full_table(20);
        for (_, f) in bin_overlap_fractions(&table, &regions) {
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }

    /// Property: a zero threshold removes exactly the bins with positive overlap
    #[test]
    fn test_zero_threshold_spares_clean_bins(regions in arb_regions()) {
        let table = full_table(20);
        let fractions: HashMap<u64, f64> = bin_overlap_fractions(&table, &regions)
            .into_iter()
            .collect();
        let clean = |start: u64| fractions[&start] == 0.0;

        let (filtered, report) = exclude_regions(&table, &regions, 0.0).unwrap();

        prop_assert!(filtered.iter().all(|r| clean(r.start1) && clean(r.start2)));
        let expected = table.iter().filter(|r| clean(r.start1) && clean(r.start2)).count();
        prop_assert_eq!(filtered.len(), expected);
        prop_assert_eq!(report.removed_records, table.len() - expected);
    }

    /// Property: every kept record has both bins below the threshold
    #[test]
    fn test_threshold_respected(regions in arb_regions(), overlap in 0.01f64..=1.0) {
        let table = full_table(20);
        let fractions: HashMap<u64, f64> = bin_overlap_fractions(&table, &regions)
            .into_iter()
            .collect();

        let (filtered, report) = exclude_regions(&table, &regions, overlap).unwrap();

        prop_assert_eq!(report.threshold, overlap);
        for r in filtered.records() {
            prop_assert!(fractions[&r.start1] < overlap);
            prop_assert!(fractions[&r.start2] < overlap);
        }
    }

    /// Property: thresholds outside [0, 1] are rejected
    #[test]
    fn test_out_of_range_threshold(overlap in prop_oneof![-10.0f64..-0.001, 1.001f64..10.0]) {
        let table = full_table(4);
        let regions = ExclusionRegionSet::from_intervals(vec![]).unwrap();
        let err = exclude_regions(&table, &regions, overlap).unwrap_err();
        prop_assert_eq!(err, UsageError::ExcludeOverlapOutOfRange(overlap));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_half_covered_bins_example() {
    let table = full_table(3);
    let regions =
        ExclusionRegionSet::from_intervals(vec![GenomicInterval::new("chr1", 500, 1500)]).unwrap();

    let (kept, report) = exclude_regions(&table, &regions, 0.5).unwrap();
    assert_eq!(report.removed_bins, 2);
    let pairs: Vec<(u64, u64)> = kept.iter().map(|r| (r.start1, r.start2)).collect();
    assert_eq!(pairs, vec![(2000, 2000)]);

    let (kept, report) = exclude_regions(&table, &regions, 0.6).unwrap();
    assert_eq!(report.removed_records, 0);
    assert_eq!(kept.len(), table.len());
}

#[test]
fn test_exclusion_through_options() {
    let entries = vec![
        SparseEntry::new(0, 1000, 4.0),
        SparseEntry::new(1000, 2000, 6.0),
        SparseEntry::new(2000, 3000, 8.0),
    ];
    let options = TableOptions {
        chromosome: Some("1".to_string()),
        scale: false,
        exclude_regions: Some(
            ExclusionRegionSet::from_intervals(vec![GenomicInterval::new("chr1", 0, 1000)])
                .unwrap(),
        ),
        ..TableOptions::default()
    };
    let table = create_hic_table(
        HicInput::Triplets(entries.clone()),
        HicInput::Triplets(entries),
        &options,
    )
    .unwrap();

    let starts: Vec<u64> = table.iter().map(|r| r.start1).collect();
    assert_eq!(starts, vec![1000, 2000]);
}

#[test]
fn test_out_of_range_rejected_before_reading() {
    let options = TableOptions {
        chromosome: Some("chr1".to_string()),
        exclude_overlap: 1.5,
        ..TableOptions::default()
    };
    let entries = vec![SparseEntry::new(0, 1000, 1.0)];
    let err = create_hic_table(
        HicInput::Triplets(entries.clone()),
        HicInput::Triplets(entries),
        &options,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        HicCompareError::Usage(UsageError::ExcludeOverlapOutOfRange(_))
    ));
}

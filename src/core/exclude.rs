//! Removal of table entries overlapping excluded genomic regions
//!
//! Uses rust-lapper for O(log n + k) overlap queries against the reduced
//! exclusion set.

use crate::core::error::UsageError;
use crate::core::interval::{chroms_equivalent, overlap_len, reduce_intervals, GenomicInterval};
use crate::core::table::HicTable;
use rust_lapper::{Interval, Lapper};
use std::collections::HashSet;

/// Default fraction of a bin that must be covered for it to be excluded
pub const DEFAULT_EXCLUDE_OVERLAP: f64 = 0.2;

type RegionInterval = Interval<u64, ()>;

/// Reduced, sorted, non-overlapping set of regions to exclude
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRegionSet {
    regions: Vec<GenomicInterval>,
}

impl ExclusionRegionSet {
    /// Build from intervals, merging overlaps
    pub fn from_intervals(intervals: Vec<GenomicInterval>) -> Result<Self, UsageError> {
        if let Some(bad) = intervals.iter().find(|iv| iv.start > iv.end) {
            return Err(UsageError::InvalidExcludeRegions(format!(
                "start greater than end in {}",
                bad
            )));
        }
        Ok(Self {
            regions: reduce_intervals(intervals),
        })
    }

    /// Build from a chr/start/end table; every row must have exactly 3 columns
    pub fn from_table<R, S>(rows: &[R]) -> Result<Self, UsageError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut intervals = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let fields = row.as_ref();
            if fields.len() != 3 {
                return Err(UsageError::InvalidExcludeRegions(format!(
                    "row {} has {} columns; expected chr, start, end",
                    idx + 1,
                    fields.len()
                )));
            }
            let start = parse_coord(fields[1].as_ref(), idx)?;
            let end = parse_coord(fields[2].as_ref(), idx)?;
            intervals.push(GenomicInterval::new(fields[0].as_ref(), start, end));
        }
        Self::from_intervals(intervals)
    }

    pub fn regions(&self) -> &[GenomicInterval] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Interval index over the regions on one chromosome
    ///
    /// Regions named with different styles (`chr1`, `1`) are merged again
    /// so they cannot be counted twice.
    fn index_for(&self, chrom: &str) -> Lapper<u64, ()> {
        let on_chrom: Vec<GenomicInterval> = self
            .regions
            .iter()
            .filter(|iv| chroms_equivalent(&iv.chrom, chrom))
            .map(|iv| GenomicInterval::new(chrom, iv.start, iv.end))
            .collect();
        let intervals: Vec<RegionInterval> = reduce_intervals(on_chrom)
            .into_iter()
            .map(|iv| Interval {
                start: iv.start,
                stop: iv.end,
                val: (),
            })
            .collect();
        Lapper::new(intervals)
    }
}

fn parse_coord(value: &str, row: usize) -> Result<u64, UsageError> {
    value.trim().parse().map_err(|_| {
        UsageError::InvalidExcludeRegions(format!(
            "row {}: '{}' is not a genomic coordinate",
            row + 1,
            value
        ))
    })
}

/// Check that an overlap threshold lies within [0, 1]
pub fn validate_exclude_overlap(overlap: f64) -> Result<(), UsageError> {
    if (0.0..=1.0).contains(&overlap) {
        Ok(())
    } else {
        Err(UsageError::ExcludeOverlapOutOfRange(overlap))
    }
}

/// Outcome of an exclusion pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionReport {
    /// Threshold actually compared against, after the zero adjustment
    pub threshold: f64,
    pub removed_bins: usize,
    pub removed_records: usize,
}

/// Fraction of every distinct table bin covered by the exclusion set
///
/// Returns `(bin start, fraction)` in ascending bin order.
pub fn bin_overlap_fractions(table: &HicTable, regions: &ExclusionRegionSet) -> Vec<(u64, f64)> {
    let index = regions.index_for(table.chrom());
    let bin_size = table.bin_size();

    table
        .bin_starts()
        .into_iter()
        .map(|start| {
            let end = start + bin_size;
            let covered: u64 = index
                .find(start, end)
                .map(|iv| overlap_len(start, end, iv.start, iv.stop))
                .sum();
            (start, covered as f64 / bin_size as f64)
        })
        .collect()
}

/// Drop records whose first or second bin overlaps the exclusion set by at
/// least `overlap` of the bin width
///
/// A threshold of exactly 0 is replaced by the smallest non-zero overlap
/// observed, so bins without any overlap are never removed.
pub fn exclude_regions(
    table: &HicTable,
    regions: &ExclusionRegionSet,
    overlap: f64,
) -> Result<(HicTable, ExclusionReport), UsageError> {
    validate_exclude_overlap(overlap)?;

    let fractions = bin_overlap_fractions(table, regions);
    let threshold = if overlap == 0.0 {
        let min_positive = fractions
            .iter()
            .map(|&(_, f)| f)
            .filter(|&f| f > 0.0)
            .fold(f64::INFINITY, f64::min);
        log::info!(
            "exclude_overlap of 0 replaced by the minimum observed overlap {}",
            min_positive
        );
        min_positive
    } else {
        overlap
    };

    let removed: HashSet<u64> = fractions
        .iter()
        .filter(|&&(_, f)| f > 0.0 && f >= threshold)
        .map(|&(start, _)| start)
        .collect();

    if removed.is_empty() {
        log::info!("No overlap found between exclusion regions and {}", table.chrom());
        let report = ExclusionReport {
            threshold,
            removed_bins: 0,
            removed_records: 0,
        };
        return Ok((table.with_records(table.records().to_vec()), report));
    }

    let records: Vec<_> = table
        .iter()
        .filter(|r| !removed.contains(&r.start1) && !removed.contains(&r.start2))
        .copied()
        .collect();
    let report = ExclusionReport {
        threshold,
        removed_bins: removed.len(),
        removed_records: table.len() - records.len(),
    };
    log::info!(
        "Removed {} records overlapping {} excluded bins on {}",
        report.removed_records,
        report.removed_bins,
        table.chrom()
    );

    Ok((table.with_records(records), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::JointRecord;

    fn table(pairs: &[(u64, u64)]) -> HicTable {
        let records = pairs
            .iter()
            .map(|&(s1, s2)| JointRecord {
                start1: s1,
                end1: s1 + 1000,
                start2: s2,
                end2: s2 + 1000,
                if1: 1.0,
                if2: 1.0,
                d: ((s2 - s1) / 1000) as f64,
                m: 0.0,
            })
            .collect();
        HicTable::new("chr1", 1000, None, records)
    }

    fn regions(ivs: &[(&str, u64, u64)]) -> ExclusionRegionSet {
        ExclusionRegionSet::from_intervals(
            ivs.iter()
                .map(|&(c, s, e)| GenomicInterval::new(c, s, e))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_half_covered_bin_removed() {
        let t = table(&[(0, 1000), (2000, 3000), (3000, 3000)]);
        let (out, report) = exclude_regions(&t, &regions(&[("chr1", 500, 1500)]), 0.2).unwrap();
        let keys: Vec<(u64, u64)> = out.iter().map(|r| (r.start1, r.start2)).collect();
        assert_eq!(keys, vec![(2000, 3000), (3000, 3000)]);
        assert_eq!(report.removed_bins, 2);
        assert_eq!(report.removed_records, 1);
    }

    #[test]
    fn test_fractions() {
        let t = table(&[(0, 1000), (2000, 3000)]);
        let fractions = bin_overlap_fractions(&t, &regions(&[("chr1", 500, 1500)]));
        assert_eq!(fractions, vec![(0, 0.5), (1000, 0.5), (2000, 0.0), (3000, 0.0)]);
    }

    #[test]
    fn test_threshold_above_overlap_keeps_bins() {
        let t = table(&[(0, 1000)]);
        let (out, report) = exclude_regions(&t, &regions(&[("chr1", 900, 1000)]), 0.2).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(report.removed_records, 0);
    }

    #[test]
    fn test_zero_threshold_uses_min_observed() {
        let t = table(&[(0, 2000), (1000, 3000)]);
        let set = regions(&[("chr1", 900, 1000), ("chr1", 1500, 2000)]);
        let (out, report) = exclude_regions(&t, &set, 0.0).unwrap();
        assert_eq!(report.threshold, 0.1);
        assert_eq!(report.removed_bins, 2);
        assert!(out.is_empty());

        let t = table(&[(0, 3000), (2000, 3000)]);
        let (out, _) = exclude_regions(&t, &set, 0.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].start1, 2000);
    }

    #[test]
    fn test_zero_threshold_without_overlap() {
        let t = table(&[(0, 1000)]);
        let (out, report) = exclude_regions(&t, &regions(&[("chr1", 5000, 6000)]), 0.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(report.removed_bins, 0);
    }

    #[test]
    fn test_overlapping_regions_not_double_counted() {
        let t = table(&[(0, 0)]);
        let set = regions(&[("chr1", 0, 600), ("chr1", 200, 600)]);
        assert_eq!(set.len(), 1);
        assert_eq!(bin_overlap_fractions(&t, &set), vec![(0, 0.6)]);
    }

    #[test]
    fn test_other_chromosomes_ignored() {
        let t = table(&[(0, 1000)]);
        let (out, _) = exclude_regions(&t, &regions(&[("chr2", 0, 2000)]), 0.2).unwrap();
        assert_eq!(out.len(), 1);

        let (out, _) = exclude_regions(&t, &regions(&[("1", 0, 1000)]), 0.2).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_overlap_range_checked() {
        let t = table(&[(0, 1000)]);
        let set = regions(&[("chr1", 0, 10)]);
        assert_eq!(
            exclude_regions(&t, &set, 1.5).unwrap_err(),
            UsageError::ExcludeOverlapOutOfRange(1.5)
        );
        assert!(exclude_regions(&t, &set, -0.1).is_err());
        assert!(validate_exclude_overlap(f64::NAN).is_err());
        assert!(validate_exclude_overlap(1.0).is_ok());
    }

    #[test]
    fn test_from_table() {
        let rows = vec![vec!["chr1", "100", "200"], vec!["chr1", "150", "300"]];
        let set = ExclusionRegionSet::from_table(&rows).unwrap();
        assert_eq!(set.regions(), &[GenomicInterval::new("chr1", 100, 300)]);

        let bad = vec![vec!["chr1", "100"]];
        assert!(matches!(
            ExclusionRegionSet::from_table(&bad),
            Err(UsageError::InvalidExcludeRegions(_))
        ));
        let bad = vec![vec!["chr1", "x", "200"]];
        assert!(ExclusionRegionSet::from_table(&bad).is_err());
        let bad = vec![vec!["chr1", "300", "200"]];
        assert!(ExclusionRegionSet::from_table(&bad).is_err());
    }
}

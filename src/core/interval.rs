//! Genomic interval primitives
//!
//! Half-open `[start, end)` intervals, chromosome name equivalence and the
//! reduce/intersect helpers used by bin exclusion.

/// A genomic interval `[start, end)` on one chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Interval width in bases
    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

impl std::fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// Normalize a chromosome name for comparison
///
/// Strips a case-insensitive `chr` prefix, uppercases the rest and folds
/// `M` into `MT`.
///
/// # Examples
/// ```
/// use fast_hiccompare::core::normalize_chrom;
///
/// assert_eq!(normalize_chrom("chr1"), "1");
/// assert_eq!(normalize_chrom("chrx"), "X");
/// assert_eq!(normalize_chrom("chrM"), "MT");
/// ```
pub fn normalize_chrom(chrom: &str) -> String {
    let without_prefix = match (chrom.get(..3), chrom.get(3..)) {
        (Some(prefix), Some(rest)) if !rest.is_empty() && prefix.eq_ignore_ascii_case("chr") => {
            rest
        }
        _ => chrom,
    };

    let upper = without_prefix.to_uppercase();
    if upper == "M" {
        "MT".to_string()
    } else {
        upper
    }
}

/// Check if two chromosome names are equivalent
///
/// # Examples
/// ```
/// use fast_hiccompare::core::chroms_equivalent;
///
/// assert!(chroms_equivalent("chr1", "1"));
/// assert!(chroms_equivalent("CHR1", "chr1"));
/// assert!(!chroms_equivalent("chr1", "chr2"));
/// ```
pub fn chroms_equivalent(chrom1: &str, chrom2: &str) -> bool {
    chrom1 == chrom2 || normalize_chrom(chrom1) == normalize_chrom(chrom2)
}

/// Length of the intersection of `[start1, end1)` and `[start2, end2)`
pub fn overlap_len(start1: u64, end1: u64, start2: u64, end2: u64) -> u64 {
    let lo = start1.max(start2);
    let hi = end1.min(end2);
    hi.saturating_sub(lo)
}

/// Merge overlapping or touching intervals into a minimal sorted cover
///
/// Zero-width intervals are dropped. Chromosome names are compared verbatim.
pub fn reduce_intervals(mut intervals: Vec<GenomicInterval>) -> Vec<GenomicInterval> {
    intervals.retain(|iv| iv.end > iv.start);
    if intervals.is_empty() {
        return intervals;
    }
    intervals.sort();

    let mut merged: Vec<GenomicInterval> = Vec::with_capacity(intervals.len());
    let mut iter = intervals.into_iter();
    let mut current = match iter.next() {
        Some(iv) => iv,
        None => return merged,
    };

    for iv in iter {
        if iv.chrom == current.chrom && iv.start <= current.end {
            current.end = current.end.max(iv.end);
        } else {
            merged.push(std::mem::replace(&mut current, iv));
        }
    }
    merged.push(current);
    merged
}

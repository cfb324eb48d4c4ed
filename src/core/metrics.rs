//! Derived metrics: library-size scaling, unit distance D and log ratio M

use crate::core::error::DataError;
use crate::core::grid::BinGrid;
use crate::core::join::{JoinPolicy, JoinedPair};
use crate::core::table::{HicTable, JointRecord};

/// sum(IF2) / sum(IF1) over the joined pairs
///
/// Returns `Ok(None)` for an empty join; a zero total on either side cannot
/// be scaled.
pub fn library_scale_factor(pairs: &[JoinedPair]) -> Result<Option<f64>, DataError> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let (sum1, sum2) = pairs
        .iter()
        .fold((0.0f64, 0.0f64), |(s1, s2), p| (s1 + p.if1, s2 + p.if2));
    if sum1 == 0.0 {
        return Err(DataError::ZeroLibrarySize(1));
    }
    if sum2 == 0.0 {
        return Err(DataError::ZeroLibrarySize(2));
    }
    Ok(Some(sum2 / sum1))
}

/// log2 ratio of IF2 over IF1
///
/// Outer joins add a pseudo-count of 1 to both sides; inner joins use the
/// raw ratio and may yield infinities or NaN for zero frequencies.
///
/// # Examples
/// ```
/// use fast_hiccompare::core::{log_ratio, JoinPolicy};
///
/// assert_eq!(log_ratio(10.0, 20.0, JoinPolicy::Inner), 1.0);
/// assert_eq!(log_ratio(0.0, 7.0, JoinPolicy::Outer), 3.0);
/// ```
pub fn log_ratio(if1: f64, if2: f64, policy: JoinPolicy) -> f64 {
    match policy {
        JoinPolicy::Outer => ((if2 + 1.0) / (if1 + 1.0)).log2(),
        JoinPolicy::Inner => (if2 / if1).log2(),
    }
}

/// Turn joined pairs into a table of records with D and M
///
/// When `scale` is set, IF2 is divided by the library scale factor before M
/// is computed.
pub fn compute_metrics(
    chrom: &str,
    pairs: Vec<JoinedPair>,
    grid: &BinGrid,
    policy: JoinPolicy,
    scale: bool,
) -> Result<HicTable, DataError> {
    let scale_factor = if scale {
        library_scale_factor(&pairs)?
    } else {
        None
    };
    if let Some(factor) = scale_factor {
        log::info!("Library scale factor for {}: {:.6}", chrom, factor);
    }

    let bin_size = grid.bin_size();
    let records = pairs
        .into_iter()
        .map(|p| {
            let if2 = match scale_factor {
                Some(factor) => p.if2 / factor,
                None => p.if2,
            };
            JointRecord {
                start1: p.region1,
                end1: p.region1 + bin_size,
                start2: p.region2,
                end2: p.region2 + bin_size,
                if1: p.if1,
                if2,
                d: grid.unit_distance(p.region1, p.region2),
                m: log_ratio(p.if1, if2, policy),
            }
        })
        .collect();

    Ok(HicTable::new(chrom, bin_size, scale_factor, records))
}

//! Joint table construction
//!
//! Runs the stages in order: input normalization, bin grid resolution,
//! join, metrics, subsetting and region exclusion. Each stage consumes the
//! previous stage's output and returns a fresh value.

use crate::core::error::{FormatError, HicCompareError, Result, UsageError};
use crate::core::exclude::{
    exclude_regions, validate_exclude_overlap, ExclusionRegionSet, DEFAULT_EXCLUDE_OVERLAP,
};
use crate::core::grid::BinGrid;
use crate::core::input::{normalize_inputs, HicInput};
use crate::core::interval::normalize_chrom;
use crate::core::join::{join_entries, JoinPolicy};
use crate::core::metrics::compute_metrics;
use crate::core::subset::{apply_subset, Subset};
use crate::core::table::HicTable;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Options controlling joint table construction
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Chromosome of 3-column sparse inputs
    pub chromosome: Option<String>,
    /// Rescale IF2 so both datasets have the same total
    pub scale: bool,
    /// Outer join with zero fill instead of inner join
    pub include_zeros: bool,
    /// Keep records with D <= this bound
    pub subset_distance: Option<f64>,
    /// 0-based index window (i_start, i_end, j_start, j_end)
    pub subset_index: Option<Vec<usize>>,
    /// Regions whose bins are removed from the table
    pub exclude_regions: Option<ExclusionRegionSet>,
    /// Fraction of a bin that must be covered to exclude it
    pub exclude_overlap: f64,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            chromosome: None,
            scale: true,
            include_zeros: false,
            subset_distance: None,
            subset_index: None,
            exclude_regions: None,
            exclude_overlap: DEFAULT_EXCLUDE_OVERLAP,
        }
    }
}

impl TableOptions {
    /// Check option consistency and resolve the subset mode
    pub fn validate(&self) -> std::result::Result<Option<Subset>, UsageError> {
        let subset = Subset::from_options(self.subset_distance, self.subset_index.as_deref())?;
        validate_exclude_overlap(self.exclude_overlap)?;
        Ok(subset)
    }

    pub fn join_policy(&self) -> JoinPolicy {
        JoinPolicy::from_include_zeros(self.include_zeros)
    }
}

/// Build the joint comparison table of two datasets on one chromosome
///
/// # Example
/// ```
/// use fast_hiccompare::core::{create_hic_table, HicInput, SparseEntry, TableOptions};
///
/// let first = HicInput::Triplets(vec![
///     SparseEntry::new(0, 1000, 10.0),
///     SparseEntry::new(0, 2000, 5.0),
/// ]);
/// let second = HicInput::Triplets(vec![
///     SparseEntry::new(0, 1000, 20.0),
///     SparseEntry::new(0, 3000, 8.0),
/// ]);
/// let options = TableOptions {
///     chromosome: Some("chr1".to_string()),
///     scale: false,
///     ..TableOptions::default()
/// };
///
/// let table = create_hic_table(first, second, &options).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.records()[0].m, 1.0);
/// ```
pub fn create_hic_table(
    first: HicInput,
    second: HicInput,
    options: &TableOptions,
) -> Result<HicTable> {
    let subset = options.validate()?;
    let policy = options.join_policy();

    let inputs = normalize_inputs(first, second, options.chromosome.as_deref())?;
    let grid = BinGrid::resolve(&inputs.first, &inputs.second)?;
    log::debug!(
        "{}: {} bins of {} bp",
        inputs.chrom,
        grid.len(),
        grid.bin_size()
    );

    let joined = join_entries(&inputs.first, &inputs.second, policy);
    if joined.is_empty() {
        log::warn!("No bin pairs shared between datasets on {}", inputs.chrom);
    }

    let mut table = compute_metrics(&inputs.chrom, joined, &grid, policy, options.scale)?;

    if let Some(subset) = subset {
        table = apply_subset(&table, &subset);
    }

    if let Some(regions) = &options.exclude_regions {
        let (filtered, _) = exclude_regions(&table, regions, options.exclude_overlap)?;
        table = filtered;
    }

    Ok(table)
}

/// Partition a region-pair or paired-interval dataset by chromosome
///
/// Chromosome names in different styles (`chr1`, `1`) land in the same
/// group, keyed by the first spelling seen. `dataset` only labels errors.
pub fn split_by_chromosome(
    dataset: usize,
    input: HicInput,
) -> std::result::Result<BTreeMap<String, HicInput>, FormatError> {
    let mut spelling: BTreeMap<String, String> = BTreeMap::new();

    match input {
        HicInput::Triplets(_) => Err(FormatError::MissingChromosome),
        HicInput::RegionPairs(rows) => {
            let mut groups: BTreeMap<String, Vec<_>> = BTreeMap::new();
            for row in rows {
                let key = chrom_key(dataset, &row.chrom1, &row.chrom2, &mut spelling)?;
                groups.entry(key).or_default().push(row);
            }
            Ok(groups
                .into_iter()
                .map(|(key, rows)| (key, HicInput::RegionPairs(rows)))
                .collect())
        }
        HicInput::Interactions(rows) => {
            let mut groups: BTreeMap<String, Vec<_>> = BTreeMap::new();
            for row in rows {
                let key = chrom_key(dataset, &row.first.chrom, &row.second.chrom, &mut spelling)?;
                groups.entry(key).or_default().push(row);
            }
            Ok(groups
                .into_iter()
                .map(|(key, rows)| (key, HicInput::Interactions(rows)))
                .collect())
        }
    }
}

fn chrom_key(
    dataset: usize,
    chrom1: &str,
    chrom2: &str,
    spelling: &mut BTreeMap<String, String>,
) -> std::result::Result<String, FormatError> {
    let norm = normalize_chrom(chrom1);
    if norm != normalize_chrom(chrom2) {
        return Err(FormatError::InterChromosomal {
            dataset,
            chrom1: chrom1.to_string(),
            chrom2: chrom2.to_string(),
        });
    }
    Ok(spelling
        .entry(norm)
        .or_insert_with(|| chrom1.to_string())
        .clone())
}

/// Build one table per chromosome shared by both datasets, in parallel
///
/// Tables are returned in chromosome name order. Chromosomes present in
/// only one dataset are skipped with a warning.
pub fn create_hic_tables_by_chromosome(
    first: HicInput,
    second: HicInput,
    options: &TableOptions,
    threads: usize,
) -> Result<Vec<HicTable>> {
    options.validate()?;

    let mut first = split_by_chromosome(1, first)?;
    let second = split_by_chromosome(2, second)?;

    let mut jobs = Vec::new();
    for (chrom, input2) in second {
        let key = first
            .keys()
            .find(|k| normalize_chrom(k) == normalize_chrom(&chrom))
            .cloned();
        match key.and_then(|k| first.remove(&k)) {
            Some(input1) => jobs.push((chrom, input1, input2)),
            None => log::warn!("{} only present in the second dataset; skipped", chrom),
        }
    }
    for chrom in first.keys() {
        log::warn!("{} only present in the first dataset; skipped", chrom);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            HicCompareError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to create thread pool: {}", e),
            ))
        })?;

    log::info!("Building {} chromosome tables on {} threads", jobs.len(), threads);
    pool.install(|| {
        jobs.into_par_iter()
            .map(|(chrom, input1, input2)| {
                let per_chrom = TableOptions {
                    chromosome: Some(chrom),
                    ..options.clone()
                };
                create_hic_table(input1, input2, &per_chrom)
            })
            .collect()
    })
}

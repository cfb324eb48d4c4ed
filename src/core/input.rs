//! Input normalization
//!
//! Interaction data reaches the pipeline in one of three encodings. Each
//! dataset is reduced to the canonical sparse form `(region1, region2, IF)`
//! and a single chromosome is resolved for the pair of datasets.

use crate::core::error::FormatError;
use crate::core::interval::{chroms_equivalent, GenomicInterval};

/// Canonical sparse upper-triangular entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseEntry {
    /// Start of the first bin
    pub region1: u64,
    /// Start of the second bin
    pub region2: u64,
    /// Interaction frequency
    pub freq: f64,
}

impl SparseEntry {
    pub fn new(region1: u64, region2: u64, freq: f64) -> Self {
        Self {
            region1,
            region2,
            freq,
        }
    }
}

/// 7-field region-pair record (BEDPE-like)
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPair {
    pub chrom1: String,
    pub start1: u64,
    pub end1: u64,
    pub chrom2: String,
    pub start2: u64,
    pub end2: u64,
    pub freq: f64,
}

/// Two genomic intervals carrying one interaction value
#[derive(Debug, Clone, PartialEq)]
pub struct PairedInterval {
    pub first: GenomicInterval,
    pub second: GenomicInterval,
    pub value: f64,
}

/// One dataset in any of the accepted encodings
#[derive(Debug, Clone, PartialEq)]
pub enum HicInput {
    /// 3-column sparse matrix; chromosome supplied separately
    Triplets(Vec<SparseEntry>),
    /// 7-column region pairs
    RegionPairs(Vec<RegionPair>),
    /// Paired intervals with a metadata value
    Interactions(Vec<PairedInterval>),
}

impl HicInput {
    /// Human readable encoding name, used in error messages
    pub fn encoding(&self) -> &'static str {
        match self {
            HicInput::Triplets(_) => "sparse triplets",
            HicInput::RegionPairs(_) => "region pairs",
            HicInput::Interactions(_) => "paired intervals",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            HicInput::Triplets(v) => v.len(),
            HicInput::RegionPairs(v) => v.len(),
            HicInput::Interactions(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chromosome pairs of every row, `None` for sparse triplets
    fn chrom_pairs(&self) -> Option<Vec<(&str, &str)>> {
        match self {
            HicInput::Triplets(_) => None,
            HicInput::RegionPairs(rows) => Some(
                rows.iter()
                    .map(|r| (r.chrom1.as_str(), r.chrom2.as_str()))
                    .collect(),
            ),
            HicInput::Interactions(rows) => Some(
                rows.iter()
                    .map(|r| (r.first.chrom.as_str(), r.second.chrom.as_str()))
                    .collect(),
            ),
        }
    }

    fn into_entries(self) -> Vec<SparseEntry> {
        match self {
            HicInput::Triplets(v) => v,
            HicInput::RegionPairs(rows) => rows
                .into_iter()
                .map(|r| SparseEntry::new(r.start1, r.start2, r.freq))
                .collect(),
            HicInput::Interactions(rows) => rows
                .into_iter()
                .map(|r| SparseEntry::new(r.first.start, r.second.start, r.value))
                .collect(),
        }
    }
}

/// Both datasets in canonical form on one chromosome
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInputs {
    pub chrom: String,
    pub first: Vec<SparseEntry>,
    pub second: Vec<SparseEntry>,
}

/// Convert two datasets to canonical sparse form
///
/// `chrom` is required for sparse triplets and ignored otherwise, since
/// region pairs and paired intervals name their own chromosome.
pub fn normalize_inputs(
    first: HicInput,
    second: HicInput,
    chrom: Option<&str>,
) -> Result<NormalizedInputs, FormatError> {
    if std::mem::discriminant(&first) != std::mem::discriminant(&second) {
        return Err(FormatError::MismatchedEncodings {
            first: first.encoding(),
            second: second.encoding(),
        });
    }

    let chrom = match (first.chrom_pairs(), second.chrom_pairs()) {
        (Some(pairs1), Some(pairs2)) => {
            let resolved = resolve_chrom(&pairs1, &pairs2, chrom)?;
            check_single_chrom(1, &pairs1, &resolved)?;
            check_single_chrom(2, &pairs2, &resolved)?;
            resolved
        }
        _ => chrom
            .map(str::to_string)
            .ok_or(FormatError::MissingChromosome)?,
    };

    let first = first.into_entries();
    let second = second.into_entries();
    check_upper_triangular(1, &first)?;
    check_upper_triangular(2, &second)?;

    log::debug!(
        "Normalized {} + {} entries on {}",
        first.len(),
        second.len(),
        chrom
    );

    Ok(NormalizedInputs {
        chrom,
        first,
        second,
    })
}

/// Pick the chromosome named by the data, falling back to the label when
/// both datasets are empty
fn resolve_chrom(
    pairs1: &[(&str, &str)],
    pairs2: &[(&str, &str)],
    label: Option<&str>,
) -> Result<String, FormatError> {
    for (dataset, pairs) in [(1, pairs1), (2, pairs2)] {
        if let Some(&(chrom1, chrom2)) = pairs.iter().find(|(c1, c2)| !chroms_equivalent(c1, c2)) {
            return Err(FormatError::InterChromosomal {
                dataset,
                chrom1: chrom1.to_string(),
                chrom2: chrom2.to_string(),
            });
        }
    }

    let from_data = pairs1.first().or_else(|| pairs2.first()).map(|(c, _)| *c);
    match (from_data, label) {
        (Some(chrom), Some(label)) => {
            if !chroms_equivalent(chrom, label) {
                log::debug!("Ignoring chromosome label {}; data is on {}", label, chrom);
            }
            Ok(chrom.to_string())
        }
        (Some(chrom), None) => Ok(chrom.to_string()),
        (None, Some(label)) => Ok(label.to_string()),
        (None, None) => Err(FormatError::MissingChromosome),
    }
}

fn check_single_chrom(
    dataset: usize,
    pairs: &[(&str, &str)],
    expected: &str,
) -> Result<(), FormatError> {
    match pairs.iter().find(|(c, _)| !chroms_equivalent(c, expected)) {
        Some(&(found, _)) => Err(FormatError::MultipleChromosomes {
            dataset,
            expected: expected.to_string(),
            found: found.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_upper_triangular(dataset: usize, entries: &[SparseEntry]) -> Result<(), FormatError> {
    match entries.iter().find(|e| e.region1 > e.region2) {
        Some(e) => Err(FormatError::LowerTriangular {
            dataset,
            region1: e.region1,
            region2: e.region2,
        }),
        None => Ok(()),
    }
}

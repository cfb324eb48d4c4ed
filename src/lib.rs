//! FastHiCcompare - joint comparison tables for pairs of Hi-C contact maps
//!
//! Reconciles two sparse, symmetric chromatin contact matrices of the same
//! chromosome into one table of aligned bin pairs with their distance (D)
//! and log2 ratio (M), ready for joint normalization and difference
//! detection.
//!
//! # Features
//!
//! - Sparse triplet, 7-column region pair and paired-interval inputs
//! - Inner or zero-filled outer join on bin pairs
//! - Library-size scaling, distance and index-window subsetting
//! - Exclusion of bins overlapping blacklisted regions
//! - Parallel per-chromosome batches with rayon
//!
//! # Example
//!
//! ```ignore
//! use fast_hiccompare::{create_hic_table, formats, TableOptions};
//!
//! let first = formats::read_hic_file("sample1.txt.gz", 1)?;
//! let second = formats::read_hic_file("sample2.txt.gz", 2)?;
//!
//! let options = TableOptions {
//!     chromosome: Some("chr1".to_string()),
//!     ..TableOptions::default()
//! };
//! let table = create_hic_table(first, second, &options)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    create_hic_table, create_hic_tables_by_chromosome, DataError, ExclusionRegionSet,
    FormatError, GenomicInterval, HicCompareError, HicInput, HicTable, JointRecord,
    PairedInterval, RegionPair, Result, SparseEntry, TableOptions, UsageError,
};
pub use formats::{regions, sparse};

//! Core joint table construction
//!
//! This module contains input normalization, bin grid resolution, the join
//! engine, metric computation, subsetting and region exclusion.

mod error;
mod exclude;
mod grid;
mod input;
mod interval;
pub mod io;
mod join;
pub mod matrix;
mod metrics;
mod pipeline;
mod subset;
mod table;

pub use error::{
    DataError, FormatError, HicCompareError, ParseError, ParseResult, Result, UsageError,
};
pub use exclude::{
    bin_overlap_fractions, exclude_regions, validate_exclude_overlap, ExclusionRegionSet,
    ExclusionReport, DEFAULT_EXCLUDE_OVERLAP,
};
pub use grid::{distinct_coords, BinGrid};
pub use input::{
    normalize_inputs, HicInput, NormalizedInputs, PairedInterval, RegionPair, SparseEntry,
};
pub use interval::{
    chroms_equivalent, normalize_chrom, overlap_len, reduce_intervals, GenomicInterval,
};
pub use io::{
    detect_compression, open_input, ByteLineIterator, CompressionFormat, DEFAULT_BUFFER_SIZE,
};
pub use join::{join_entries, JoinPolicy, JoinedPair};
pub use matrix::DenseMatrix;
pub use metrics::{compute_metrics, library_scale_factor, log_ratio};
pub use pipeline::{
    create_hic_table, create_hic_tables_by_chromosome, split_by_chromosome, TableOptions,
};
pub use subset::{apply_subset, Subset};
pub use table::{HicTable, JointRecord, TABLE_COLUMNS};

//! Error types for FastHiCcompare
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FastHiCcompare operations
#[derive(Debug, Error)]
pub enum HicCompareError {
    /// Conflicting or malformed options
    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    /// Unsupported or inconsistent input encodings
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Inputs that cannot produce a table
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Text input parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conflicting or malformed table options
#[derive(Debug, Error, PartialEq)]
pub enum UsageError {
    /// Distance and index subsetting requested together
    #[error("subset_distance and subset_index cannot be used together")]
    ConflictingSubsets,

    /// Index window does not have four bounds
    #[error("subset_index must contain exactly 4 values (i_start, i_end, j_start, j_end), got {0}")]
    InvalidSubsetIndex(usize),

    /// Overlap threshold outside [0, 1]
    #[error("exclude_overlap must be within [0, 1], got {0}")]
    ExcludeOverlapOutOfRange(f64),

    /// Exclusion table is not chr/start/end
    #[error("Invalid exclude_regions: {0}")]
    InvalidExcludeRegions(String),
}

/// Input encodings that cannot be reconciled
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// The two datasets use different encodings
    #[error("Both datasets must use the same encoding, got {first} and {second}")]
    MismatchedEncodings {
        first: &'static str,
        second: &'static str,
    },

    /// Sparse triplets carry no chromosome of their own
    #[error("A chromosome must be supplied for 3-column sparse input")]
    MissingChromosome,

    /// chrom1 != chrom2 in some row
    #[error(
        "Inter-chromosomal interactions not supported: {chrom1} vs {chrom2} in dataset {dataset}"
    )]
    InterChromosomal {
        dataset: usize,
        chrom1: String,
        chrom2: String,
    },

    /// Rows from more than one chromosome
    #[error("Dataset {dataset} contains chromosome {found}, expected {expected}")]
    MultipleChromosomes {
        dataset: usize,
        expected: String,
        found: String,
    },

    /// region1 > region2
    #[error("Dataset {dataset} is not upper triangular: region1 ({region1}) > region2 ({region2})")]
    LowerTriangular {
        dataset: usize,
        region1: u64,
        region2: u64,
    },

    /// Column count is neither 3 nor 7
    #[error("Dataset {dataset} has {columns} columns; expected 3 (sparse) or 7 (region pairs)")]
    InvalidColumnCount { dataset: usize, columns: usize },

    /// Dense matrix is not square
    #[error("Dense matrix must be square with {expected} rows and columns")]
    NonSquareMatrix { expected: usize },
}

/// Inputs from which no table can be derived
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    /// Fewer than two distinct coordinates
    #[error("Cannot determine bin size: {0} distinct coordinate(s) observed, need at least 2")]
    DegenerateBinGrid(usize),

    /// A dataset sums to zero over the joined table
    #[error("Cannot scale: total interaction frequency of dataset {0} is zero")]
    ZeroLibrarySize(usize),
}

/// Errors raised while reading interaction or region text files
#[derive(Debug, Error)]
pub enum ParseError {
    /// Invalid data line
    #[error("Invalid data line at line {line}: {message}")]
    InvalidDataLine { line: usize, message: String },

    /// Column count changes within one file
    #[error("Inconsistent column count at line {line}: expected {expected}, got {found}")]
    InconsistentColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Failed to parse a number
    #[error("Failed to parse number '{value}' at line {line}")]
    ParseNumber { line: usize, value: String },

    /// File not found
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FastHiCcompare operations
pub type Result<T> = std::result::Result<T, HicCompareError>;

/// Result type alias for text parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

//! File format adapters
//!
//! Readers for interaction matrices (sparse triplets, region pairs) and
//! exclusion region BED files.

pub mod regions;
pub mod sparse;

pub use regions::{parse_regions_reader, read_regions_file};
pub use sparse::{parse_hic_reader, read_hic_file};

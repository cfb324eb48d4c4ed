//! Exclusion region reader
//!
//! Reads chr/start/end BED files into an [`ExclusionRegionSet`]. Rows must
//! carry exactly three columns.

use crate::core::io::{open_input, ByteLineIterator};
use crate::core::{ExclusionRegionSet, ParseError, Result};
use crate::formats::sparse::{is_skippable, split_fields};
use std::io::BufRead;
use std::path::Path;

/// Parse exclusion regions from a reader
pub fn parse_regions_reader<R: BufRead>(reader: R) -> Result<ExclusionRegionSet> {
    let mut lines = ByteLineIterator::new(reader);
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line.map_err(ParseError::Io)?;
        line_number += 1;
        if is_skippable(line) {
            continue;
        }
        let row = split_fields(line)
            .into_iter()
            .map(|f| {
                std::str::from_utf8(f)
                    .map(|s| s.trim().to_string())
                    .map_err(|_| ParseError::InvalidDataLine {
                        line: line_number,
                        message: "field is not valid UTF-8".to_string(),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let regions = ExclusionRegionSet::from_table(&rows)?;
    log::info!(
        "Read {} exclusion regions ({} after merging)",
        rows.len(),
        regions.len()
    );
    Ok(regions)
}

/// Read a 3-column BED file of regions to exclude
pub fn read_regions_file<P: AsRef<Path>>(path: P) -> Result<ExclusionRegionSet> {
    let reader = open_input(path)?;
    parse_regions_reader(reader)
}

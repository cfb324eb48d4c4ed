//! Interaction matrix text reader
//!
//! Reads 3-column sparse matrices (`region1 region2 IF`) and 7-column
//! region pairs (`chr1 start1 end1 chr2 start2 end2 IF`). The encoding is
//! chosen from the column count of the first data line.

use crate::core::io::{open_input, ByteLineIterator};
use crate::core::{FormatError, HicInput, ParseError, RegionPair, Result, SparseEntry};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// Split a line on tabs, or on ASCII whitespace when it has no tab
pub(crate) fn split_fields(line: &[u8]) -> Vec<&[u8]> {
    if memchr(b'\t', line).is_some() {
        line.split(|&b| b == b'\t').collect()
    } else {
        line.split(|b| b.is_ascii_whitespace())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

/// True for blank, comment and track/browser lines
pub(crate) fn is_skippable(line: &[u8]) -> bool {
    match line.iter().position(|b| !b.is_ascii_whitespace()) {
        None => true,
        Some(pos) => {
            let trimmed = &line[pos..];
            trimmed.starts_with(b"#")
                || trimmed.starts_with(b"track")
                || trimmed.starts_with(b"browser")
        }
    }
}

fn field_str(field: &[u8], line: usize) -> std::result::Result<&str, ParseError> {
    std::str::from_utf8(field)
        .map(str::trim)
        .map_err(|_| ParseError::InvalidDataLine {
            line,
            message: "field is not valid UTF-8".to_string(),
        })
}

fn parse_coord(field: &[u8], line: usize) -> std::result::Result<u64, ParseError> {
    let s = field_str(field, line)?;
    s.parse().map_err(|_| ParseError::ParseNumber {
        line,
        value: s.to_string(),
    })
}

fn parse_freq(field: &[u8], line: usize) -> std::result::Result<f64, ParseError> {
    let s = field_str(field, line)?;
    s.parse().map_err(|_| ParseError::ParseNumber {
        line,
        value: s.to_string(),
    })
}

fn parse_triplet(fields: &[&[u8]], line: usize) -> std::result::Result<SparseEntry, ParseError> {
    Ok(SparseEntry::new(
        parse_coord(fields[0], line)?,
        parse_coord(fields[1], line)?,
        parse_freq(fields[2], line)?,
    ))
}

fn parse_region_pair(fields: &[&[u8]], line: usize) -> std::result::Result<RegionPair, ParseError> {
    Ok(RegionPair {
        chrom1: field_str(fields[0], line)?.to_string(),
        start1: parse_coord(fields[1], line)?,
        end1: parse_coord(fields[2], line)?,
        chrom2: field_str(fields[3], line)?.to_string(),
        start2: parse_coord(fields[4], line)?,
        end2: parse_coord(fields[5], line)?,
        freq: parse_freq(fields[6], line)?,
    })
}

/// A header names its columns, so its first coordinate field is not a number
fn is_header(fields: &[&[u8]], columns: usize) -> bool {
    let coord = if columns == 3 { fields[0] } else { fields[1] };
    std::str::from_utf8(coord)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .is_none()
}

/// Parse an interaction matrix from a reader
///
/// `dataset` numbers the input in error messages. A first data line whose
/// leading coordinate is not a number is treated as a column header and
/// skipped; any other parse failure is an error.
pub fn parse_hic_reader<R: BufRead>(reader: R, dataset: usize) -> Result<HicInput> {
    let mut lines = ByteLineIterator::new(reader);
    let mut columns: Option<usize> = None;
    let mut triplets = Vec::new();
    let mut pairs = Vec::new();
    let mut header_checked = false;
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line.map_err(ParseError::Io)?;
        line_number += 1;
        if is_skippable(line) {
            continue;
        }
        let fields = split_fields(line);

        let expected = match columns {
            Some(n) => n,
            None => match fields.len() {
                3 | 7 => fields.len(),
                n => {
                    return Err(FormatError::InvalidColumnCount {
                        dataset,
                        columns: n,
                    }
                    .into())
                }
            },
        };
        if fields.len() != expected {
            return Err(ParseError::InconsistentColumns {
                line: line_number,
                expected,
                found: fields.len(),
            }
            .into());
        }

        let parsed = if expected == 3 {
            parse_triplet(&fields, line_number).map(|e| triplets.push(e))
        } else {
            parse_region_pair(&fields, line_number).map(|p| pairs.push(p))
        };

        match parsed {
            Ok(()) => {}
            Err(_) if !header_checked && is_header(&fields, expected) => {
                log::warn!("Skipping header line {} of dataset {}", line_number, dataset);
            }
            Err(e) => return Err(e.into()),
        }
        header_checked = true;
        columns = Some(expected);
    }

    let input = match columns {
        Some(7) => HicInput::RegionPairs(pairs),
        _ => HicInput::Triplets(triplets),
    };
    log::info!(
        "Read {} {} from dataset {}",
        input.len(),
        input.encoding(),
        dataset
    );
    Ok(input)
}

/// Read an interaction matrix file (plain, gzip or bzip2)
pub fn read_hic_file<P: AsRef<Path>>(path: P, dataset: usize) -> Result<HicInput> {
    let reader = open_input(path)?;
    parse_hic_reader(reader, dataset)
}

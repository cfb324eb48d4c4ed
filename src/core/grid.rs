//! Bin grid resolution
//!
//! The bin size of a sparse matrix is never stored alongside it; it is
//! recovered as the smallest gap between the observed bin coordinates.

use crate::core::error::DataError;
use crate::core::input::SparseEntry;

/// Sorted distinct bin coordinates of one chromosome and their bin size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinGrid {
    bin_size: u64,
    coords: Vec<u64>,
}

impl BinGrid {
    /// Resolve the grid from the union of both datasets
    pub fn resolve(first: &[SparseEntry], second: &[SparseEntry]) -> Result<Self, DataError> {
        let coords = distinct_coords(first.iter().chain(second.iter()));
        Self::from_coords(coords)
    }

    /// Build a grid from observed coordinates in any order
    pub fn from_coords(mut coords: Vec<u64>) -> Result<Self, DataError> {
        coords.sort_unstable();
        coords.dedup();

        let bin_size = coords
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|&gap| gap > 0)
            .min()
            .ok_or(DataError::DegenerateBinGrid(coords.len()))?;

        let off_grid = coords
            .iter()
            .filter(|&&c| (c - coords[0]) % bin_size != 0)
            .count();
        if off_grid > 0 {
            log::warn!(
                "{} coordinate(s) are not multiples of the bin size {} from {}",
                off_grid,
                bin_size,
                coords[0]
            );
        }

        Ok(Self { bin_size, coords })
    }

    pub fn bin_size(&self) -> u64 {
        self.bin_size
    }

    /// Distinct observed coordinates in ascending order
    pub fn coords(&self) -> &[u64] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Ordinal position of an observed coordinate
    pub fn index_of(&self, coord: u64) -> Option<usize> {
        self.coords.binary_search(&coord).ok()
    }

    /// Distance between two coordinates in bins
    pub fn unit_distance(&self, region1: u64, region2: u64) -> f64 {
        region1.abs_diff(region2) as f64 / self.bin_size as f64
    }
}

/// Sorted distinct region1/region2 values
pub fn distinct_coords<'a, I>(entries: I) -> Vec<u64>
where
    I: IntoIterator<Item = &'a SparseEntry>,
{
    let mut coords: Vec<u64> = entries
        .into_iter()
        .flat_map(|e| [e.region1, e.region2])
        .collect();
    coords.sort_unstable();
    coords.dedup();
    coords
}

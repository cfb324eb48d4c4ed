//! Dense symmetric contact matrices
//!
//! Converts between the sparse upper-triangular form and a full square
//! matrix laid out over the canonical bin grid.

use crate::core::error::{FormatError, HicCompareError};
use crate::core::grid::{distinct_coords, BinGrid};
use crate::core::input::SparseEntry;

/// Square symmetric matrix over the bins of one chromosome, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    grid: BinGrid,
    values: Vec<f64>,
}

impl DenseMatrix {
    /// Expand sparse entries into a full matrix
    ///
    /// Rows and columns follow the distinct observed coordinates. Entries
    /// sharing a bin pair are summed.
    pub fn from_sparse(entries: &[SparseEntry]) -> crate::core::Result<Self> {
        let grid = BinGrid::from_coords(distinct_coords(entries))?;
        let n = grid.len();
        let mut values = vec![0.0; n * n];

        for e in entries {
            // Both coordinates were used to build the grid
            let (Some(i), Some(j)) = (grid.index_of(e.region1), grid.index_of(e.region2)) else {
                continue;
            };
            values[i * n + j] += e.freq;
            if i != j {
                values[j * n + i] += e.freq;
            }
        }

        Ok(Self { grid, values })
    }

    /// Wrap full rows whose i-th row and column belong to `coords[i]`
    pub fn from_rows(coords: Vec<u64>, rows: Vec<Vec<f64>>) -> Result<Self, HicCompareError> {
        let n = coords.len();
        if rows.len() != n || rows.iter().any(|row| row.len() != n) {
            return Err(FormatError::NonSquareMatrix { expected: n }.into());
        }
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| coords[i]);

        let grid = BinGrid::from_coords(coords.clone())?;
        if grid.len() != n {
            return Err(FormatError::NonSquareMatrix { expected: grid.len() }.into());
        }

        let mut values = Vec::with_capacity(n * n);
        for &i in &order {
            values.extend(order.iter().map(|&j| rows[i][j]));
        }
        Ok(Self { grid, values })
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.grid.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim() + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.dim();
        &self.values[i * n..(i + 1) * n]
    }

    /// Non-zero upper-triangular entries in row-major order
    pub fn to_sparse(&self) -> Vec<SparseEntry> {
        let coords = self.grid.coords();
        let n = self.dim();
        let mut entries = Vec::new();
        for i in 0..n {
            for j in i..n {
                let v = self.values[i * n + j];
                if v != 0.0 {
                    entries.push(SparseEntry::new(coords[i], coords[j], v));
                }
            }
        }
        entries
    }
}

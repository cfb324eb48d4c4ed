//! Table restriction by distance or by matrix index window

use crate::core::error::UsageError;
use crate::core::table::HicTable;
use std::collections::HashMap;

/// A restriction applied to the joint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subset {
    /// Keep records with D <= the bound
    ///
    /// Coordinates are kept as-is, so the result can no longer be placed
    /// back into a square matrix by index.
    Distance(f64),
    /// Keep records whose 0-based row index lies in `i_start..=i_end` and
    /// column index in `j_start..=j_end`
    IndexWindow {
        i_start: usize,
        i_end: usize,
        j_start: usize,
        j_end: usize,
    },
}

impl Subset {
    /// Build the restriction from the two mutually exclusive options
    pub fn from_options(
        distance: Option<f64>,
        index: Option<&[usize]>,
    ) -> Result<Option<Self>, UsageError> {
        match (distance, index) {
            (Some(_), Some(_)) => Err(UsageError::ConflictingSubsets),
            (Some(d), None) => Ok(Some(Subset::Distance(d))),
            (None, Some(&[i_start, i_end, j_start, j_end])) => Ok(Some(Subset::IndexWindow {
                i_start,
                i_end,
                j_start,
                j_end,
            })),
            (None, Some(bounds)) => Err(UsageError::InvalidSubsetIndex(bounds.len())),
            (None, None) => Ok(None),
        }
    }
}

/// Apply a restriction, returning a new table
pub fn apply_subset(table: &HicTable, subset: &Subset) -> HicTable {
    let records = match *subset {
        Subset::Distance(max_d) => table.iter().filter(|r| r.d <= max_d).copied().collect(),
        Subset::IndexWindow {
            i_start,
            i_end,
            j_start,
            j_end,
        } => {
            let order: HashMap<u64, usize> = table
                .bin_starts()
                .into_iter()
                .enumerate()
                .map(|(idx, start)| (start, idx))
                .collect();
            table
                .iter()
                .filter(|r| {
                    let i = order[&r.start1];
                    let j = order[&r.start2];
                    (i_start..=i_end).contains(&i) && (j_start..=j_end).contains(&j)
                })
                .copied()
                .collect()
        }
    };

    let subset_table = table.with_records(records);
    log::debug!(
        "{:?} kept {} of {} records",
        subset,
        subset_table.len(),
        table.len()
    );
    subset_table
}

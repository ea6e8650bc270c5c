use log::trace;

use crate::error::{Error, Result};

pub use combine::CombinationMode;
pub use geometry::{AlignmentBounds, PositionRange};
pub use storage::{
    AlignmentStorage, DenseStorage, HashedStorage, MAX_DENSE_POSITION, SortedSparseStorage,
};

pub mod combine;
pub mod geometry;
#[cfg(feature = "serde")]
mod io;
pub mod storage;

#[cfg(test)]
mod tests;

/// The largest position an alignment accepts, so that diagonal offsets stay representable.
pub const MAX_POSITION: usize = isize::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedPair {
    pub row: usize,
    pub col: usize,
    pub score: f64,
}

/// A 1-to-1 partial mapping between the positions of a row entity and a column entity.
///
/// Positions are 0-based. Unmapped positions are gaps. Pairs are expected to be monotone,
/// i.e. iterating them by increasing row also yields increasing columns.
/// Inserting a pair whose row or column is already mapped replaces the old pair.
///
/// Bounds and score are kept up to date on every mutation.
/// An empty alignment has no bounds, and all bound queries return `None`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment<Storage = DenseStorage> {
    storage: Storage,
    bounds: Option<AlignmentBounds>,
    score: f64,
}

impl<Storage: AlignmentStorage> Alignment<Storage> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty alignment using the same storage strategy as `self`.
    pub fn new_empty(&self) -> Self {
        Self::new()
    }

    pub fn add_pair(&mut self, row: usize, col: usize, score: f64) -> Result<()> {
        check_position(row)?;
        check_position(col)?;
        self.storage.reserve(row, col)?;

        let mut displaced = false;
        if let Some(old) = self.storage.remove(row) {
            self.score -= old.score;
            displaced = true;
        }
        if let Some(old_row) = self.storage.row_of_col(col) {
            if let Some(old) = self.storage.remove(old_row) {
                self.score -= old.score;
                displaced = true;
            }
        }

        self.storage.insert(AlignedPair { row, col, score });
        self.score += score;

        if displaced {
            self.update_bounds();
        } else if let Some(bounds) = &mut self.bounds {
            bounds.extend(row, col);
        } else {
            self.bounds = Some(AlignmentBounds::single(row, col));
        }
        Ok(())
    }

    /// Maps each row in `row_from..row_to` to column `row + offset` with score zero.
    ///
    /// Fails without changing anything if a column would be negative or too large.
    pub fn add_diagonal(&mut self, row_from: usize, row_to: usize, offset: isize) -> Result<()> {
        if row_from >= row_to {
            return Ok(());
        }

        let last_row = row_to - 1;
        check_position(last_row)?;
        for row in [row_from, last_row] {
            match row.checked_add_signed(offset) {
                Some(col) => check_position(col)?,
                None => {
                    return Err(Error::InvalidPosition {
                        position: row as i128 + offset as i128,
                    });
                }
            }
        }

        self.storage
            .reserve(last_row, last_row.wrapping_add_signed(offset))?;

        for row in row_from..row_to {
            // Both ends were checked above.
            let col = row.wrapping_add_signed(offset);
            self.add_pair(row, col, 0.0)?;
        }
        Ok(())
    }

    pub fn map_row_to_col(&self, row: usize) -> Option<usize> {
        self.storage.get(row).map(|pair| pair.col)
    }

    pub fn map_col_to_row(&self, col: usize) -> Option<usize> {
        self.storage.row_of_col(col)
    }

    pub fn pair(&self, row: usize) -> Option<&AlignedPair> {
        self.storage.get(row)
    }

    /// Iterates over all pairs in increasing row order.
    pub fn iter(&self) -> Storage::Iter<'_> {
        self.storage.iter()
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn bounds(&self) -> Option<AlignmentBounds> {
        self.bounds
    }

    pub fn row_from(&self) -> Option<usize> {
        self.bounds.map(|bounds| bounds.row.offset())
    }

    pub fn row_to(&self) -> Option<usize> {
        self.bounds.map(|bounds| bounds.row.limit())
    }

    pub fn col_from(&self) -> Option<usize> {
        self.bounds.map(|bounds| bounds.col.offset())
    }

    pub fn col_to(&self) -> Option<usize> {
        self.bounds.map(|bounds| bounds.col.limit())
    }

    /// The number of pairs plus the number of unmapped positions between the bounds on both axes.
    pub fn length(&self) -> usize {
        self.bounds
            .map(|bounds| bounds.row.len() + bounds.col.len() - self.storage.len())
            .unwrap_or(0)
    }

    /// The number of unmapped positions between the bounds on both axes.
    pub fn num_gaps(&self) -> usize {
        self.length() - self.len()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn is_monotone(&self) -> bool {
        let mut previous_col = None;
        self.storage.iter().all(|pair| {
            let increasing = previous_col.is_none_or(|previous| previous < pair.col);
            previous_col = Some(pair.col);
            increasing
        })
    }

    pub fn clear(&mut self) {
        self.storage.clear();
        self.bounds = None;
        self.score = 0.0;
    }

    /// Removes all pairs with a row in `from..to`.
    ///
    /// Empty, inverted and out-of-bounds ranges are ignored.
    pub fn remove_row_region(&mut self, from: usize, to: usize) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let range = PositionRange::new(from, to).intersect(&bounds.row);
        if range.is_empty() {
            return;
        }

        let rows = self.storage.rows_in(range.range());
        self.remove_rows(rows);
    }

    /// Removes all pairs with a column in `from..to`.
    ///
    /// Empty, inverted and out-of-bounds ranges are ignored.
    pub fn remove_col_region(&mut self, from: usize, to: usize) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let range = PositionRange::new(from, to).intersect(&bounds.col);
        if range.is_empty() {
            return;
        }

        let rows = self
            .storage
            .iter()
            .filter(|pair| range.contains(pair.col))
            .map(|pair| pair.row)
            .collect();
        self.remove_rows(rows);
    }

    /// Replaces the alignment by its inverse, mapping columns to rows.
    pub fn switch_row_col(&mut self) {
        let pairs: Vec<_> = self.storage.iter().copied().collect();
        self.storage.clear();
        for pair in pairs {
            self.storage.insert(AlignedPair {
                row: pair.col,
                col: pair.row,
                score: pair.score,
            });
        }
        self.bounds = self.bounds.map(|bounds| bounds.transposed());
    }

    /// Adds `offset` to every row.
    ///
    /// Fails without changing anything if a row would become negative or too large.
    pub fn shift_rows(&mut self, offset: isize) -> Result<()> {
        self.shift(offset, 0)
    }

    /// Adds `offset` to every column.
    ///
    /// Fails without changing anything if a column would become negative or too large.
    pub fn shift_cols(&mut self, offset: isize) -> Result<()> {
        self.shift(0, offset)
    }

    fn shift(&mut self, row_offset: isize, col_offset: isize) -> Result<()> {
        let Some(bounds) = self.bounds else {
            return Ok(());
        };
        if row_offset == 0 && col_offset == 0 {
            return Ok(());
        }
        for (position, offset) in [
            (bounds.row.offset(), row_offset),
            (bounds.row.limit() - 1, row_offset),
            (bounds.col.offset(), col_offset),
            (bounds.col.limit() - 1, col_offset),
        ] {
            match position.checked_add_signed(offset) {
                Some(shifted) => check_position(shifted)?,
                None => {
                    return Err(Error::InvalidPosition {
                        position: position as i128 + offset as i128,
                    });
                }
            }
        }

        self.storage.reserve(
            (bounds.row.limit() - 1).wrapping_add_signed(row_offset),
            (bounds.col.limit() - 1).wrapping_add_signed(col_offset),
        )?;

        let pairs: Vec<_> = self.storage.iter().copied().collect();
        self.storage.clear();
        for pair in pairs {
            self.storage.insert(AlignedPair {
                row: pair.row.wrapping_add_signed(row_offset),
                col: pair.col.wrapping_add_signed(col_offset),
                score: pair.score,
            });
        }
        self.update_bounds();
        Ok(())
    }

    fn remove_rows(&mut self, rows: Vec<usize>) {
        if rows.is_empty() {
            return;
        }

        trace!("Removing {} pairs", rows.len());
        for row in rows {
            if let Some(pair) = self.storage.remove(row) {
                self.score -= pair.score;
            }
        }
        self.update_bounds();
    }

    fn update_bounds(&mut self) {
        self.bounds = self.storage.iter().fold(None, |bounds, pair| {
            Some(match bounds {
                Some(mut bounds) => {
                    bounds.extend(pair.row, pair.col);
                    bounds
                }
                None => AlignmentBounds::single(pair.row, pair.col),
            })
        });

        if self.bounds.is_none() {
            self.score = 0.0;
        }
    }
}

fn check_position(position: usize) -> Result<()> {
    if position > MAX_POSITION {
        Err(Error::InvalidPosition {
            position: position as i128,
        })
    } else {
        Ok(())
    }
}

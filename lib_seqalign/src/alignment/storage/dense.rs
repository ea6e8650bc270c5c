use std::{iter::Flatten, mem::size_of, ops::Range, slice};

use super::AlignmentStorage;
use crate::{
    alignment::AlignedPair,
    error::{Error, Result},
};

/// The largest row or column a [`DenseStorage`] can hold.
pub const MAX_DENSE_POSITION: usize = isize::MAX as usize / size_of::<Option<AlignedPair>>() - 1;

/// Pairs stored in a vector indexed by row, with a second vector indexed by column.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseStorage {
    rows: Vec<Option<AlignedPair>>,
    cols: Vec<Option<usize>>,
    len: usize,
}

impl AlignmentStorage for DenseStorage {
    type Iter<'storage> = Flatten<slice::Iter<'storage, Option<AlignedPair>>>;

    fn get(&self, row: usize) -> Option<&AlignedPair> {
        self.rows.get(row).and_then(Option::as_ref)
    }

    fn row_of_col(&self, col: usize) -> Option<usize> {
        self.cols.get(col).copied().flatten()
    }

    fn reserve(&mut self, row: usize, col: usize) -> Result<()> {
        reserve_index(&mut self.rows, row)?;
        reserve_index(&mut self.cols, col)
    }

    fn insert(&mut self, pair: AlignedPair) {
        debug_assert!(self.get(pair.row).is_none());
        debug_assert!(self.row_of_col(pair.col).is_none());

        if self.rows.len() <= pair.row {
            self.rows.resize(pair.row + 1, None);
        }
        if self.cols.len() <= pair.col {
            self.cols.resize(pair.col + 1, None);
        }
        self.rows[pair.row] = Some(pair);
        self.cols[pair.col] = Some(pair.row);
        self.len += 1;
    }

    fn remove(&mut self, row: usize) -> Option<AlignedPair> {
        let pair = self.rows.get_mut(row)?.take()?;
        self.cols[pair.col] = None;
        self.len -= 1;

        if self.len == 0 {
            self.rows.clear();
            self.cols.clear();
        }
        Some(pair)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.cols.clear();
        self.len = 0;
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.rows.iter().flatten()
    }

    fn rows_in(&self, range: Range<usize>) -> Vec<usize> {
        let limit = range.end.min(self.rows.len());
        (range.start.min(limit)..limit)
            .filter(|&row| self.rows[row].is_some())
            .collect()
    }
}

fn reserve_index<Item>(vector: &mut Vec<Item>, index: usize) -> Result<()> {
    let invalid = || Error::InvalidPosition {
        position: index as i128,
    };
    if index > MAX_DENSE_POSITION {
        return Err(invalid());
    }

    let additional = (index + 1).saturating_sub(vector.len());
    vector.try_reserve(additional).map_err(|_| invalid())
}

use std::{fmt::Debug, ops::Range};

use super::AlignedPair;
use crate::error::Result;

pub use dense::{DenseStorage, MAX_DENSE_POSITION};
pub use hashed::HashedStorage;
pub use sorted::SortedSparseStorage;

mod dense;
mod hashed;
mod sorted;

/// The representation of the pairs of an [`Alignment`](super::Alignment).
///
/// Implementations only store pairs. Uniqueness of rows and columns, bounds and scores
/// are maintained by the alignment itself, so every strategy behaves identically behind it.
pub trait AlignmentStorage: Debug + Clone + Default {
    type Iter<'storage>: Iterator<Item = &'storage AlignedPair>
    where
        Self: 'storage;

    fn get(&self, row: usize) -> Option<&AlignedPair>;

    fn row_of_col(&self, col: usize) -> Option<usize>;

    /// Makes room for a pair at `row` and `col`, so that inserting it cannot fail.
    ///
    /// Fails without changing the stored pairs if the storage cannot represent the pair.
    fn reserve(&mut self, _row: usize, _col: usize) -> Result<()> {
        Ok(())
    }

    /// Stores a pair. Neither its row nor its column may be mapped already.
    fn insert(&mut self, pair: AlignedPair);

    fn remove(&mut self, row: usize) -> Option<AlignedPair>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Iterates over all pairs in increasing row order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns the rows of all pairs whose row lies in `range`, in increasing order.
    fn rows_in(&self, range: Range<usize>) -> Vec<usize> {
        self.iter()
            .map(|pair| pair.row)
            .filter(|row| range.contains(row))
            .collect()
    }
}

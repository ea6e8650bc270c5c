use std::vec;

use deterministic_default_hasher::DeterministicHashMap;

use super::AlignmentStorage;
use crate::alignment::AlignedPair;

/// Pairs stored in hash maps keyed by row and by column.
///
/// Lookups are constant time, ordered iteration sorts the pairs on demand.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashedStorage {
    rows: DeterministicHashMap<usize, AlignedPair>,
    cols: DeterministicHashMap<usize, usize>,
}

impl AlignmentStorage for HashedStorage {
    type Iter<'storage> = vec::IntoIter<&'storage AlignedPair>;

    fn get(&self, row: usize) -> Option<&AlignedPair> {
        self.rows.get(&row)
    }

    fn row_of_col(&self, col: usize) -> Option<usize> {
        self.cols.get(&col).copied()
    }

    fn insert(&mut self, pair: AlignedPair) {
        debug_assert!(!self.rows.contains_key(&pair.row));
        debug_assert!(!self.cols.contains_key(&pair.col));

        self.rows.insert(pair.row, pair);
        self.cols.insert(pair.col, pair.row);
    }

    fn remove(&mut self, row: usize) -> Option<AlignedPair> {
        let pair = self.rows.remove(&row)?;
        self.cols.remove(&pair.col);
        Some(pair)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.cols.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        let mut pairs: Vec<_> = self.rows.values().collect();
        pairs.sort_unstable_by_key(|pair| pair.row);
        pairs.into_iter()
    }
}

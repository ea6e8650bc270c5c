use std::{
    collections::{BTreeMap, btree_map},
    ops::Range,
};

use super::AlignmentStorage;
use crate::alignment::AlignedPair;

/// Pairs stored in ordered maps, suitable for long sequences with few aligned positions.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortedSparseStorage {
    rows: BTreeMap<usize, AlignedPair>,
    cols: BTreeMap<usize, usize>,
}

impl AlignmentStorage for SortedSparseStorage {
    type Iter<'storage> = btree_map::Values<'storage, usize, AlignedPair>;

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
        self.rows.values()
    }

    fn rows_in(&self, range: Range<usize>) -> Vec<usize> {
        if range.is_empty() {
            return Vec::new();
        }
        self.rows.range(range).map(|(&row, _)| row).collect()
    }
}

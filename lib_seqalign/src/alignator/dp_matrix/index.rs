use std::ops::{Index, IndexMut};

use ndarray::Array2;

use super::DpLayer;

/// A cell of the dynamic programming matrix.
///
/// Row and column zero are the boundary, cell `(i, j)` with `i, j > 0`
/// corresponds to row position `i - 1` and column position `j - 1` of the aligned ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpIndex {
    pub(in crate::alignator) row: usize,
    pub(in crate::alignator) col: usize,
}

impl DpIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn insertion_predecessor(&self) -> Self {
        debug_assert!(self.col > 0);

        Self {
            row: self.row,
            col: self.col - 1,
        }
    }

    pub fn deletion_predecessor(&self) -> Self {
        debug_assert!(self.row > 0);

        Self {
            row: self.row - 1,
            col: self.col,
        }
    }

    pub fn match_predecessor(&self) -> Self {
        debug_assert!(self.row > 0);
        debug_assert!(self.col > 0);

        Self {
            row: self.row - 1,
            col: self.col - 1,
        }
    }

    /// The diagonal predecessor of a cell in the first column when the columns are circular.
    pub fn wrapped_match_predecessor(&self, col_len: usize) -> Self {
        debug_assert!(self.row > 0);
        debug_assert_eq!(self.col, 1);

        Self {
            row: self.row - 1,
            col: col_len,
        }
    }

    /// The cells of column `col`, starting at row zero.
    pub fn column_cells(col: usize, rows: usize) -> impl Iterator<Item = Self> {
        (0..rows).map(move |row| Self::new(row, col))
    }

    /// The cells of row `row`, starting at column zero.
    pub fn row_cells(row: usize, cols: usize) -> impl Iterator<Item = Self> {
        (0..cols).map(move |col| Self::new(row, col))
    }

    /// The cells outside of row and column zero in row-major order.
    ///
    /// Every cell comes after its predecessors, including the last cell of the previous row.
    pub fn inner_cells(rows: usize, cols: usize) -> impl Iterator<Item = Self> {
        (1..rows).flat_map(move |row| (1..cols).map(move |col| Self::new(row, col)))
    }

    pub fn predecessor(&self, layer: DpLayer) -> Self {
        match layer {
            DpLayer::Match => self.match_predecessor(),
            DpLayer::Deletion => self.deletion_predecessor(),
            DpLayer::Insertion => self.insertion_predecessor(),
        }
    }
}

impl<T> Index<DpIndex> for Array2<T> {
    type Output = <Array2<T> as Index<[usize; 2]>>::Output;

    fn index(&self, index: DpIndex) -> &Self::Output {
        &self[[index.row, index.col]]
    }
}

impl<T> IndexMut<DpIndex> for Array2<T> {
    fn index_mut(&mut self, index: DpIndex) -> &mut Self::Output {
        &mut self[[index.row, index.col]]
    }
}

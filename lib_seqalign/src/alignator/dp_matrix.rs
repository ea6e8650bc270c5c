use std::fmt::Display;

use index::DpIndex;
use log::trace;
use ndarray::Array2;
use noisy_float::types::{N64, n64};
use num_traits::Zero;

use crate::error::Result;

use super::{
    config::{AlignatorConfig, AlignmentMode, EndGapPolicy},
    pairwise::CellBudget,
};

pub mod index;

/// The affine gap dynamic programming matrix with one layer per move type.
#[derive(Debug, Clone, PartialEq)]
pub struct DpMatrix {
    matrix: Array2<DpEntry>,
    mode: AlignmentMode,
    gap_open: N64,
    gap_extend: N64,
    end_gaps: EndGapPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpLayer {
    /// Row and column position are paired.
    Match,
    /// A row position is aligned to a gap.
    Deletion,
    /// A column position is aligned to a gap.
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpCell {
    pub score: N64,
    /// `None` if the path starts in this cell.
    pub predecessor: Option<DpLayer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DpEntry {
    pub matched: DpCell,
    pub deletion: DpCell,
    pub insertion: DpCell,
}

/// A pair on a traced path, relative to the aligned ranges.
///
/// `lap` counts how often the path wrapped around the column range before reaching this pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracedPair {
    pub row: usize,
    pub col: usize,
    pub lap: usize,
}

impl DpMatrix {
    pub fn new(config: &AlignatorConfig, row_len: usize, col_len: usize) -> Self {
        Self {
            matrix: Array2::default((row_len + 1, col_len + 1)),
            mode: config.mode,
            gap_open: n64(config.gap_open),
            gap_extend: n64(config.gap_extend),
            end_gaps: config.end_gaps,
        }
    }

    pub fn row_len(&self) -> usize {
        self.matrix.dim().0 - 1
    }

    pub fn col_len(&self) -> usize {
        self.matrix.dim().1 - 1
    }

    /// Computes all cells.
    ///
    /// `substitution(row, col)` returns the score of pairing the given positions, relative to the aligned ranges.
    pub fn fill(
        &mut self,
        mut substitution: impl FnMut(usize, usize) -> Result<N64>,
        budget: &mut CellBudget,
    ) -> Result<()> {
        self.initialise();

        let (rows, cols) = self.matrix.dim();
        for index in DpIndex::inner_cells(rows, cols) {
            budget.visit()?;
            let score = substitution(index.row - 1, index.col - 1)?;
            self.set_entry(index, score);
        }

        trace!("Filled {} matrix:\n{self}", self.mode);
        Ok(())
    }

    /// Returns the cell and layer where the optimal path ends, together with its score.
    ///
    /// Ties are resolved in favour of the first cell in row-major order.
    /// Local and wrapped alignments without a positive score have no terminal.
    pub fn terminal(&self) -> Option<(DpIndex, DpLayer, N64)> {
        let (row_len, col_len) = (self.row_len(), self.col_len());
        let (rows, cols) = self.matrix.dim();
        let mut best: Option<(DpIndex, DpLayer, N64)> = None;

        if self.mode == AlignmentMode::Global {
            for row in 0..=row_len {
                for index in DpIndex::row_cells(row, cols) {
                    let is_terminal = (index.row == row_len
                        && (index.col == col_len || !self.end_gaps.penalize_row_trailing))
                        || (index.col == col_len && !self.end_gaps.penalize_col_trailing);
                    if !is_terminal {
                        continue;
                    }

                    let (layer, score) = self.matrix[index].best();
                    if best.is_none_or(|(_, _, best_score)| score > best_score) {
                        best = Some((index, layer, score));
                    }
                }
            }
        } else {
            for index in DpIndex::inner_cells(rows, cols) {
                if self.mode == AlignmentMode::Wrap && index.row != row_len && index.col != col_len
                {
                    continue;
                }

                let score = self.matrix[index].matched.score;
                if score > N64::zero() && best.is_none_or(|(_, _, best_score)| score > best_score) {
                    best = Some((index, DpLayer::Match, score));
                }
            }
        }

        best
    }

    /// Follows the predecessors from `index` in `layer` and returns the paired positions in ascending order.
    pub fn traceback(&self, mut index: DpIndex, mut layer: DpLayer) -> Vec<TracedPair> {
        let mut traced = Vec::new();
        let mut wraps = 0;

        while index.row > 0 && index.col > 0 {
            let cell = self.matrix[index].cell(layer);
            if layer == DpLayer::Match {
                traced.push(TracedPair {
                    row: index.row - 1,
                    col: index.col - 1,
                    lap: wraps,
                });
            }

            let Some(predecessor) = cell.predecessor else {
                break;
            };
            index = if layer == DpLayer::Match
                && self.mode == AlignmentMode::Wrap
                && index.col == 1
            {
                wraps += 1;
                index.wrapped_match_predecessor(self.col_len())
            } else {
                index.predecessor(layer)
            };
            layer = predecessor;
        }

        traced.reverse();
        for pair in &mut traced {
            pair.lap = wraps - pair.lap;
        }
        traced
    }

    fn initialise(&mut self) {
        if self.mode != AlignmentMode::Global {
            // Paths start anywhere, so the boundary stays unreachable.
            return;
        }

        // Initialise matrix origin.
        self.matrix[[0, 0]].matched = DpCell::start(N64::zero());

        // Initialise matrix edges.
        let (rows, cols) = self.matrix.dim();
        for index in DpIndex::column_cells(0, rows).skip(1) {
            self.matrix[index].deletion = self.leading_gap(
                index.row,
                DpLayer::Deletion,
                self.end_gaps.penalize_col_leading,
            );
        }
        for index in DpIndex::row_cells(0, cols).skip(1) {
            self.matrix[index].insertion = self.leading_gap(
                index.col,
                DpLayer::Insertion,
                self.end_gaps.penalize_row_leading,
            );
        }
    }

    fn leading_gap(&self, length: usize, layer: DpLayer, penalize: bool) -> DpCell {
        let score = if penalize {
            self.gap_open + self.gap_extend * n64((length - 1) as f64)
        } else {
            N64::zero()
        };

        DpCell {
            score,
            predecessor: (length > 1).then_some(layer),
        }
    }

    fn set_entry(&mut self, index: DpIndex, substitution: N64) {
        let diagonal = if self.mode == AlignmentMode::Wrap && index.col == 1 {
            index.wrapped_match_predecessor(self.col_len())
        } else {
            index.match_predecessor()
        };

        let (layer, score) = self.matrix[diagonal].best();
        let matched = if self.mode != AlignmentMode::Global && score <= N64::zero() {
            DpCell::start(substitution)
        } else {
            DpCell {
                score: score + substitution,
                predecessor: Some(layer),
            }
        };

        let deletion = self.gap_cell(
            index.deletion_predecessor(),
            DpLayer::Deletion,
            DpLayer::Insertion,
        );
        let insertion = self.gap_cell(
            index.insertion_predecessor(),
            DpLayer::Insertion,
            DpLayer::Deletion,
        );

        self.matrix[index] = DpEntry {
            matched,
            deletion,
            insertion,
        };
    }

    /// Extending `gap` is preferred over opening it from a match, which is preferred over opening it from `other_gap`.
    fn gap_cell(&self, predecessor: DpIndex, gap: DpLayer, other_gap: DpLayer) -> DpCell {
        let entry = &self.matrix[predecessor];
        let mut cell = DpCell {
            score: entry.cell(gap).score + self.gap_extend,
            predecessor: Some(gap),
        };

        for layer in [DpLayer::Match, other_gap] {
            let score = entry.cell(layer).score + self.gap_open;
            if score > cell.score {
                cell = DpCell {
                    score,
                    predecessor: Some(layer),
                };
            }
        }

        cell
    }
}

impl DpLayer {
    fn symbol(&self) -> char {
        match self {
            DpLayer::Match => 'M',
            DpLayer::Deletion => 'D',
            DpLayer::Insertion => 'I',
        }
    }
}

impl DpCell {
    fn start(score: N64) -> Self {
        Self {
            score,
            predecessor: None,
        }
    }
}

impl DpEntry {
    pub fn cell(&self, layer: DpLayer) -> &DpCell {
        match layer {
            DpLayer::Match => &self.matched,
            DpLayer::Deletion => &self.deletion,
            DpLayer::Insertion => &self.insertion,
        }
    }

    /// The best layer of this entry, preferring matches over deletions over insertions on ties.
    pub fn best(&self) -> (DpLayer, N64) {
        let mut best = (DpLayer::Match, self.matched.score);
        for layer in [DpLayer::Deletion, DpLayer::Insertion] {
            let score = self.cell(layer).score;
            if score > best.1 {
                best = (layer, score);
            }
        }
        best
    }
}

impl Default for DpCell {
    fn default() -> Self {
        Self {
            score: n64(f64::NEG_INFINITY),
            predecessor: None,
        }
    }
}

impl Display for DpMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.matrix.map(|entry| {
            let (layer, score) = entry.best();
            format!("{score}{}", layer.symbol())
        });

        let mut column_widths = vec![0; cells.dim().1];
        for ((_, col), cell) in cells.indexed_iter() {
            column_widths[col] = column_widths[col].max(cell.len());
        }

        for row in cells.rows() {
            write!(f, "[ ")?;
            for (cell, width) in row.iter().zip(&column_widths) {
                write!(f, "{cell: >width$} ", width = *width)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

use crate::error::{Error, Result};

use super::{Alignment, AlignmentStorage};

/// Selects the coordinates on which [`Alignment::combine`] joins its two inputs.
///
/// The first half names the coordinate of the left input, the second half the coordinate of the right input.
/// The remaining coordinates form the rows and columns of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationMode {
    RowRow,
    RowCol,
    ColRow,
    ColCol,
}

impl<Storage: AlignmentStorage> Alignment<Storage> {
    /// Replaces `self` with the composition of `lhs` and `rhs` over a shared coordinate.
    ///
    /// For example, with [`CombinationMode::ColRow`] a pair `(a, b)` of `lhs` and a pair `(b, c)` of `rhs`
    /// produce the pair `(a, c)`. All pairs of the result have score zero.
    pub fn combine<LhsStorage: AlignmentStorage, RhsStorage: AlignmentStorage>(
        &mut self,
        lhs: &Alignment<LhsStorage>,
        rhs: &Alignment<RhsStorage>,
        mode: CombinationMode,
    ) -> Result<()> {
        self.clear();

        for pair in lhs.iter() {
            let (key, value) = match mode {
                CombinationMode::RowRow | CombinationMode::RowCol => (pair.row, pair.col),
                CombinationMode::ColRow | CombinationMode::ColCol => (pair.col, pair.row),
            };
            let mapped = match mode {
                CombinationMode::RowRow | CombinationMode::ColRow => rhs.map_row_to_col(key),
                CombinationMode::RowCol | CombinationMode::ColCol => rhs.map_col_to_row(key),
            };

            if let Some(mapped) = mapped {
                self.add_pair(value, mapped, 0.0)?;
            }
        }

        Ok(())
    }

    /// Appends all pairs of `other`, which must lie behind the end of `self` on both axes.
    pub fn append<OtherStorage: AlignmentStorage>(
        &mut self,
        other: &Alignment<OtherStorage>,
    ) -> Result<()> {
        if let (Some(own), Some(others)) = (self.bounds, other.bounds) {
            if others.row.offset() < own.row.limit() || others.col.offset() < own.col.limit() {
                return Err(Error::IncompatibleAlignments {
                    reason: format!("[{others}] does not start behind [{own}]"),
                });
            }
        }

        for pair in other.iter() {
            self.add_pair(pair.row, pair.col, pair.score)?;
        }
        Ok(())
    }

    /// Recomputes the score from the pair scores and affine costs for all internal gaps.
    ///
    /// A gap of length `k` on either axis contributes `gap_open + (k - 1) * gap_extend`.
    pub fn calculate_affine_score(&mut self, gap_open: f64, gap_extend: f64) -> f64 {
        let mut score = 0.0;
        let mut previous: Option<(usize, usize)> = None;

        for pair in self.storage.iter() {
            if let Some((row, col)) = previous {
                for gap in [
                    pair.row.saturating_sub(row + 1),
                    pair.col.saturating_sub(col + 1),
                ] {
                    if gap > 0 {
                        score += gap_open + (gap - 1) as f64 * gap_extend;
                    }
                }
            }
            score += pair.score;
            previous = Some((pair.row, pair.col));
        }

        self.score = score;
        score
    }
}

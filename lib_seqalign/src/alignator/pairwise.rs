use log::debug;
use noisy_float::types::{N64, n64};

use crate::{
    alignandum::{Alignandum, Column},
    alignment::{AlignedPair, Alignment, AlignmentStorage, PositionRange},
    error::{Error, Result},
    scoring::Scorer,
};

use super::{
    Alignator, check_prepared, clamp_range,
    config::{AlignatorConfig, AlignmentMode},
    dp_matrix::DpMatrix,
    groupies,
};

/// Aligns two entities with the mode and gap costs of its [`AlignatorConfig`].
///
/// The alignator counts the matrix cells it visits over its lifetime.
/// If the config has a cell limit, a single alignment visiting more cells is aborted.
#[derive(Debug, Clone)]
pub struct PairwiseAlignator<ScorerType> {
    config: AlignatorConfig,
    scorer: ScorerType,
    visited_cells: u64,
}

/// Counts visited cells of a single alignment against an optional limit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellBudget {
    visited: u64,
    limit: Option<u64>,
}

/// The score-relevant view of the aligned ranges.
pub(crate) struct ScoringContext<'entity, 'scorer, ScorerType> {
    pub row_range: PositionRange,
    pub col_range: PositionRange,
    row_columns: Vec<Column<'entity>>,
    col_columns: Vec<Column<'entity>>,
    scorer: &'scorer ScorerType,
}

impl<ScorerType: Scorer> PairwiseAlignator<ScorerType> {
    /// Fails if the gap penalties of `config` are invalid.
    pub fn new(config: AlignatorConfig, scorer: ScorerType) -> Result<Self> {
        config.verify()?;
        Ok(Self {
            config,
            scorer,
            visited_cells: 0,
        })
    }

    pub fn config(&self) -> &AlignatorConfig {
        &self.config
    }

    pub fn scorer(&self) -> &ScorerType {
        &self.scorer
    }

    /// The number of matrix cells visited by all alignments computed so far.
    pub fn visited_cells(&self) -> u64 {
        self.visited_cells
    }

    fn align_dp(
        &self,
        context: &ScoringContext<'_, '_, ScorerType>,
        budget: &mut CellBudget,
    ) -> Result<(Vec<AlignedPair>, f64)> {
        let mut matrix = DpMatrix::new(
            &self.config,
            context.row_range.len(),
            context.col_range.len(),
        );
        matrix.fill(|row, col| context.checked_score(row, col), budget)?;

        let Some((terminal, layer, score)) = matrix.terminal() else {
            return Ok((Vec::new(), 0.0));
        };

        let col_len = context.col_range.len();
        let pairs = matrix
            .traceback(terminal, layer)
            .into_iter()
            .map(|traced| AlignedPair {
                row: context.row_range.offset() + traced.row,
                col: context.col_range.offset() + traced.lap * col_len + traced.col,
                score: context.score(traced.row, traced.col),
            })
            .collect();
        Ok((pairs, score.raw()))
    }
}

impl<ScorerType: Scorer> Alignator for PairwiseAlignator<ScorerType> {
    fn align_ranges<Storage: AlignmentStorage>(
        &mut self,
        result: &mut Alignment<Storage>,
        row: &dyn Alignandum,
        row_range: PositionRange,
        col: &dyn Alignandum,
        col_range: PositionRange,
    ) -> Result<()> {
        result.clear();
        check_prepared(row, col)?;
        self.scorer.validate(row, col)?;

        let row_range = clamp_range(row, row_range);
        let col_range = clamp_range(col, col_range);
        if row_range.is_empty() || col_range.is_empty() {
            debug!("Skipping alignment of empty ranges {row_range} and {col_range}");
            return Ok(());
        }

        debug!(
            "Aligning rows {row_range} against columns {col_range} in {} mode",
            self.config.mode
        );
        let context = ScoringContext::new(row, row_range, col, col_range, &self.scorer)?;
        let mut budget = CellBudget::new(self.config.cell_limit);
        let outcome = match self.config.mode {
            AlignmentMode::Groupies => groupies::align(&context, &mut budget),
            AlignmentMode::Global | AlignmentMode::Local | AlignmentMode::Wrap => {
                self.align_dp(&context, &mut budget)
            }
        };
        self.visited_cells += budget.visited();
        let (pairs, score) = outcome?;

        for pair in pairs {
            if let Err(error) = result.add_pair(pair.row, pair.col, pair.score) {
                result.clear();
                return Err(error);
            }
        }
        result.set_score(score);

        debug!(
            "Found alignment with score {} and length {} after visiting {} cells",
            result.score(),
            result.length(),
            budget.visited()
        );
        Ok(())
    }
}

impl CellBudget {
    pub fn new(limit: Option<u64>) -> Self {
        Self { visited: 0, limit }
    }

    pub fn visited(&self) -> u64 {
        self.visited
    }

    pub fn visit(&mut self) -> Result<()> {
        self.visited += 1;
        match self.limit {
            Some(limit) if self.visited > limit => Err(Error::CellLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

impl<'entity, 'scorer, ScorerType: Scorer> ScoringContext<'entity, 'scorer, ScorerType> {
    fn new(
        row: &'entity dyn Alignandum,
        row_range: PositionRange,
        col: &'entity dyn Alignandum,
        col_range: PositionRange,
        scorer: &'scorer ScorerType,
    ) -> Result<Self> {
        Ok(Self {
            row_range,
            col_range,
            row_columns: row_range
                .range()
                .map(|position| row.column(position))
                .collect::<Result<_>>()?,
            col_columns: col_range
                .range()
                .map(|position| col.column(position))
                .collect::<Result<_>>()?,
            scorer,
        })
    }

    /// The score of pairing the given positions relative to the ranges.
    pub fn score(&self, row: usize, col: usize) -> f64 {
        self.scorer
            .score(&self.row_columns[row], &self.col_columns[col])
    }

    /// Like [`score`](Self::score), but fails if the score is not a finite number.
    ///
    /// Infinite scores are rejected as well.
    pub fn checked_score(&self, row: usize, col: usize) -> Result<N64> {
        let score = self.score(row, col);
        if score.is_finite() {
            Ok(n64(score))
        } else {
            Err(Error::ScoreNotANumber {
                row: self.row_range.offset() + row,
                col: self.col_range.offset() + col,
            })
        }
    }
}

use log::trace;

use crate::{alignment::AlignedPair, error::Result, scoring::Scorer};

use super::pairwise::{CellBudget, ScoringContext};

/// Pairs every row position with its best scoring column after the column of the previous pair.
///
/// Only positive scores are paired. Ties go to the first column.
/// Columns up to the previous pair are skipped even if they score best, so a row whose best column
/// lies before the previous pair takes its best later column or stays unpaired.
pub(super) fn align<ScorerType: Scorer>(
    context: &ScoringContext<'_, '_, ScorerType>,
    budget: &mut CellBudget,
) -> Result<(Vec<AlignedPair>, f64)> {
    let mut pairs = Vec::new();
    let mut total = 0.0;
    let mut first_free_col = 0;

    for row in 0..context.row_range.len() {
        let mut best: Option<(usize, f64)> = None;
        for col in first_free_col..context.col_range.len() {
            budget.visit()?;
            let score = context.checked_score(row, col)?.raw();
            if score > 0.0 && best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }

        if let Some((col, score)) = best {
            trace!("Pairing row {row} with column {col} at score {score}");
            pairs.push(AlignedPair {
                row: context.row_range.offset() + row,
                col: context.col_range.offset() + col,
                score,
            });
            total += score;
            first_free_col = col + 1;
        }
    }

    Ok((pairs, total))
}

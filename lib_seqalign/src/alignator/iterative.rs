use log::{debug, trace};

use crate::{
    alignandum::Alignandum,
    alignment::{Alignment, AlignmentStorage, PositionRange},
    error::Result,
};

use super::{Alignator, clamp_range, config::IterativeConfig};

/// Collects several non-overlapping alignments by repeatedly aligning the regions left over by earlier ones.
///
/// After an alignment is accepted, the regions before and after it are aligned independently,
/// so the combined result stays monotone. The score of the result is the sum of all accepted alignments.
#[derive(Debug, Clone)]
pub struct IterativeAlignator<AlignatorType> {
    alignator: AlignatorType,
    config: IterativeConfig,
}

impl<AlignatorType: Alignator> IterativeAlignator<AlignatorType> {
    pub fn new(alignator: AlignatorType, config: IterativeConfig) -> Self {
        Self { alignator, config }
    }

    pub fn alignator(&self) -> &AlignatorType {
        &self.alignator
    }

    pub fn config(&self) -> &IterativeConfig {
        &self.config
    }

    fn align_windows<Storage: AlignmentStorage>(
        &mut self,
        result: &mut Alignment<Storage>,
        row: &dyn Alignandum,
        col: &dyn Alignandum,
        windows: &mut Vec<(PositionRange, PositionRange)>,
    ) -> Result<f64> {
        let mut total = 0.0;
        let mut fragment = result.new_empty();

        while let Some((row_window, col_window)) = windows.pop() {
            if row_window.is_empty() || col_window.is_empty() {
                continue;
            }

            self.alignator
                .align_ranges(&mut fragment, row, row_window, col, col_window)?;
            let Some(bounds) = fragment.bounds() else {
                trace!("No alignment in {row_window} and {col_window}");
                continue;
            };
            if fragment.score() <= self.config.min_score {
                trace!(
                    "Rejecting alignment with score {} in {row_window} and {col_window}",
                    fragment.score()
                );
                continue;
            }

            trace!(
                "Accepting alignment with score {} at {bounds}",
                fragment.score()
            );
            for pair in fragment.iter() {
                result.add_pair(pair.row, pair.col, pair.score)?;
            }
            total += fragment.score();

            windows.push((
                PositionRange::new(bounds.row.limit(), row_window.limit()),
                PositionRange::new(bounds.col.limit(), col_window.limit()),
            ));
            windows.push((
                PositionRange::new(row_window.offset(), bounds.row.offset()),
                PositionRange::new(col_window.offset(), bounds.col.offset()),
            ));
        }

        Ok(total)
    }
}

impl<AlignatorType: Alignator> Alignator for IterativeAlignator<AlignatorType> {
    fn align_ranges<Storage: AlignmentStorage>(
        &mut self,
        result: &mut Alignment<Storage>,
        row: &dyn Alignandum,
        row_range: PositionRange,
        col: &dyn Alignandum,
        col_range: PositionRange,
    ) -> Result<()> {
        result.clear();
        let mut windows = vec![(clamp_range(row, row_range), clamp_range(col, col_range))];

        match self.align_windows(result, row, col, &mut windows) {
            Ok(total) => {
                result.set_score(total);
                debug!(
                    "Iterative alignment found {} pairs with score {total}",
                    result.len()
                );
                Ok(())
            }
            Err(error) => {
                result.clear();
                Err(error)
            }
        }
    }
}

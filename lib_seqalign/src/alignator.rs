use crate::{
    alignandum::Alignandum,
    alignment::{Alignment, AlignmentStorage, PositionRange},
    error::{Error, Result},
    mult_alignment::MultAlignment,
};

pub use config::{AlignatorConfig, AlignmentMode, EndGapPolicy, IterativeConfig};
pub use iterative::IterativeAlignator;
pub use pairwise::PairwiseAlignator;
pub use progressive::ProgressiveAlignator;

pub mod config;
mod dp_matrix;
mod groupies;
pub mod iterative;
pub mod pairwise;
pub mod progressive;


/// Computes a pairwise alignment between two entities.
///
/// The result maps row entity positions to column entity positions.
/// Any previous content of the result is discarded.
pub trait Alignator {
    /// Aligns `row_range` of `row` against `col_range` of `col`.
    ///
    /// Ranges are clamped to the entities. An empty range produces an empty result.
    fn align_ranges<Storage: AlignmentStorage>(
        &mut self,
        result: &mut Alignment<Storage>,
        row: &dyn Alignandum,
        row_range: PositionRange,
        col: &dyn Alignandum,
        col_range: PositionRange,
    ) -> Result<()>;

    /// Aligns the active ranges of both entities.
    fn align<Storage: AlignmentStorage>(
        &mut self,
        result: &mut Alignment<Storage>,
        row: &dyn Alignandum,
        col: &dyn Alignandum,
    ) -> Result<()> {
        self.align_ranges(result, row, row.active_range(), col, col.active_range())
    }
}

/// Computes a multiple alignment of a set of entities.
///
/// Row `i` of the result maps the multiple alignment columns to the positions of entity `i`.
pub trait MultipleAlignator {
    /// Aligns `ranges[i]` of each `entities[i]`.
    fn align_ranges<Storage: AlignmentStorage>(
        &mut self,
        result: &mut MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
        ranges: &[PositionRange],
    ) -> Result<()>;

    /// Aligns the active ranges of all entities.
    fn align<Storage: AlignmentStorage>(
        &mut self,
        result: &mut MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
    ) -> Result<()> {
        let ranges: Vec<_> = entities
            .iter()
            .map(|entity| entity.active_range())
            .collect();
        self.align_ranges(result, entities, &ranges)
    }
}

pub(crate) fn clamp_range(entity: &dyn Alignandum, range: PositionRange) -> PositionRange {
    range.intersect(&PositionRange::new_complete(entity.full_len()))
}

pub(crate) fn check_prepared(row: &dyn Alignandum, col: &dyn Alignandum) -> Result<()> {
    if row.is_prepared() && col.is_prepared() {
        Ok(())
    } else {
        Err(Error::Unprepared)
    }
}

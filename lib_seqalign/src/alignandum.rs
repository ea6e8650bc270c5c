use ndarray::ArrayView1;

use crate::{alignment::PositionRange, error::Result};

pub use encoder::Encoder;
pub use profile::{
    Profile,
    statistics::{LogOddor, ProfileStatistics, Regularizor, Weightor},
};
pub use sequence::Sequence;

pub mod encoder;
#[cfg(feature = "serde")]
mod io;
pub mod profile;
pub mod sequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignandumKind {
    Sequence,
    Profile,
}

/// What an alignable entity contributes to scoring at one position.
#[derive(Debug, Clone, PartialEq)]
pub enum Column<'entity> {
    /// A masked position, which scores zero against anything.
    Masked,
    /// A single residue code.
    Residue(u8),
    /// A frequency distribution over residue codes.
    Distribution(ArrayView1<'entity, f64>),
    /// A frequency distribution together with position-specific log-odds scores, both indexed by residue code.
    Profile {
        frequencies: ArrayView1<'entity, f64>,
        scores: ArrayView1<'entity, f64>,
    },
}

/// An entity that can be aligned: a sequence or a profile.
///
/// Positions are 0-based and refer to the full entity.
/// The active range restricts aligners to a segment without copying the entity.
pub trait Alignandum {
    fn kind(&self) -> AlignandumKind;

    fn full_len(&self) -> usize;

    fn active_range(&self) -> PositionRange;

    /// Restricts the active range to `from..to`, clamped to the entity.
    fn use_segment(&mut self, from: usize, to: usize);

    fn use_full_length(&mut self) {
        self.use_segment(0, self.full_len());
    }

    /// The length of the active range.
    fn len(&self) -> usize {
        self.active_range().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mask(&mut self, position: usize);

    fn is_masked(&self, position: usize) -> bool;

    fn is_prepared(&self) -> bool;

    /// Computes derived statistics needed for scoring.
    fn prepare(&mut self);

    /// Discards derived statistics that are cheap to recompute.
    fn release(&mut self);

    fn alphabet_size(&self) -> usize;

    /// Returns the scoring view of `position`.
    ///
    /// Fails if the position lies outside of the entity, or if the entity is not prepared.
    fn column(&self, position: usize) -> Result<Column<'_>>;

    /// Renders `position` as a character, using the mask character for masked positions.
    fn as_char(&self, position: usize) -> char;
}

pub(crate) fn clamp_segment(from: usize, to: usize, length: usize) -> PositionRange {
    let to = to.min(length);
    PositionRange::new(from.min(to), to)
}

use bitvec::vec::BitVec;

use crate::{
    alignment::PositionRange,
    error::{Error, Result},
};

use super::{Alignandum, AlignandumKind, Column, Encoder, clamp_segment};

/// A sequence of residue codes.
///
/// Sequences carry no derived statistics, so they are always prepared.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    residues: Vec<u8>,
    mask: BitVec,
    active_range: PositionRange,
    encoder: Encoder,
}

impl Sequence {
    pub fn new(text: &str, encoder: &Encoder) -> Self {
        let residues = encoder.encode(text);
        let length = residues.len();
        Self {
            residues,
            mask: BitVec::repeat(false, length),
            active_range: PositionRange::new_complete(length),
            encoder: encoder.clone(),
        }
    }

    pub fn from_residues(residues: Vec<u8>, encoder: &Encoder) -> Result<Self> {
        if let Some(position) = residues
            .iter()
            .position(|&residue| usize::from(residue) >= encoder.alphabet_size())
        {
            return Err(Error::InvalidPosition {
                position: position as i128,
            });
        }

        let length = residues.len();
        Ok(Self {
            residues,
            mask: BitVec::repeat(false, length),
            active_range: PositionRange::new_complete(length),
            encoder: encoder.clone(),
        })
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    pub fn residue(&self, position: usize) -> Option<u8> {
        self.residues.get(position).copied()
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// Renders the active range.
    pub fn to_text(&self) -> String {
        self.active_range
            .range()
            .map(|position| self.as_char(position))
            .collect()
    }
}

impl Alignandum for Sequence {
    fn kind(&self) -> AlignandumKind {
        AlignandumKind::Sequence
    }

    fn full_len(&self) -> usize {
        self.residues.len()
    }

    fn active_range(&self) -> PositionRange {
        self.active_range
    }

    fn use_segment(&mut self, from: usize, to: usize) {
        self.active_range = clamp_segment(from, to, self.residues.len());
    }

    fn mask(&mut self, position: usize) {
        if position < self.mask.len() {
            self.mask.set(position, true);
        }
    }

    fn is_masked(&self, position: usize) -> bool {
        self.mask.get(position).is_some_and(|masked| *masked)
    }

    fn is_prepared(&self) -> bool {
        true
    }

    fn prepare(&mut self) {}

    fn release(&mut self) {}

    fn alphabet_size(&self) -> usize {
        self.encoder.alphabet_size()
    }

    fn column(&self, position: usize) -> Result<Column<'_>> {
        let residue = self.residue(position).ok_or(Error::InvalidPosition {
            position: position as i128,
        })?;

        if self.is_masked(position) {
            Ok(Column::Masked)
        } else {
            Ok(Column::Residue(residue))
        }
    }

    fn as_char(&self, position: usize) -> char {
        match self.residue(position) {
            Some(_) if self.is_masked(position) => self.encoder.mask_char(),
            Some(residue) => self.encoder.decode(residue),
            None => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::alignandum::{Alignandum, Column, Encoder};

    use super::Sequence;

    #[test]
    fn residues_and_columns() {
        let sequence = Sequence::new("ACDE", &Encoder::protein());
        assert_eq!(sequence.full_len(), 4);
        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.column(1).unwrap(), Column::Residue(4));
        assert!(sequence.column(4).is_err());
        assert_eq!(sequence.to_text(), "ACDE");
    }

    #[test]
    fn masking() {
        let mut sequence = Sequence::new("ACDE", &Encoder::protein());
        sequence.mask(2);
        sequence.mask(10);
        assert!(sequence.is_masked(2));
        assert!(!sequence.is_masked(1));
        assert_eq!(sequence.column(2).unwrap(), Column::Masked);
        assert_eq!(sequence.to_text(), "ACXE");
    }

    #[test]
    fn segments_are_clamped() {
        let mut sequence = Sequence::new("ACDEFGHIK", &Encoder::protein());
        sequence.use_segment(2, 5);
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.to_text(), "DEF");
        // Positions stay absolute.
        assert_eq!(sequence.column(0).unwrap(), Column::Residue(0));

        sequence.use_segment(7, 100);
        assert_eq!(sequence.active_range().limit(), 9);
        assert_eq!(sequence.to_text(), "IK");

        sequence.use_segment(6, 3);
        assert!(sequence.is_empty());

        sequence.use_full_length();
        assert_eq!(sequence.len(), 9);
    }

    #[test]
    fn always_prepared() {
        let mut sequence = Sequence::new("AC", &Encoder::protein());
        sequence.release();
        assert!(sequence.is_prepared());
        assert!(sequence.column(0).is_ok());
    }

    #[test]
    fn invalid_residue_codes() {
        assert!(Sequence::from_residues(vec![0, 1, 30], &Encoder::protein()).is_err());
        assert!(Sequence::from_residues(vec![0, 1, 22], &Encoder::protein()).is_ok());
    }
}

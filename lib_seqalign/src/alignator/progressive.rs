use log::{debug, trace};

use crate::{
    alignandum::{Alignandum, Encoder, Profile},
    alignment::{Alignment, AlignmentStorage, PositionRange},
    error::Result,
    mult_alignment::{MultAlignment, check_entity_count},
};

use super::{Alignator, MultipleAlignator, clamp_range};

/// Builds a multiple alignment by aligning each entity against a profile of the entities before it.
///
/// The first entity defines the initial columns. After each step, the multiple alignment is expanded
/// so that the next profile covers all residues aligned so far.
#[derive(Debug, Clone)]
pub struct ProgressiveAlignator<AlignatorType> {
    alignator: AlignatorType,
    encoder: Encoder,
}

impl<AlignatorType: Alignator> ProgressiveAlignator<AlignatorType> {
    /// Profiles are built over the alphabet of `encoder`.
    pub fn new(alignator: AlignatorType, encoder: Encoder) -> Self {
        Self { alignator, encoder }
    }

    pub fn alignator(&self) -> &AlignatorType {
        &self.alignator
    }

    fn align_progressively<Storage: AlignmentStorage>(
        &mut self,
        result: &mut MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
        ranges: &[PositionRange],
    ) -> Result<()> {
        let Some((first_range, _)) = ranges.split_first() else {
            return Ok(());
        };

        let mut first_row = Alignment::new();
        first_row.add_diagonal(0, first_range.len(), first_range.offset() as isize)?;
        result.add(first_row);

        for (index, (entity, range)) in entities.iter().zip(ranges).enumerate().skip(1) {
            result.expand_within(&ranges[..index])?;
            let mut profile = Profile::from_mult_alignment(result, &entities[..index], &self.encoder)?;
            profile.prepare();

            let mut row = Alignment::new();
            self.alignator.align_ranges(
                &mut row,
                &profile,
                PositionRange::new_complete(profile.full_len()),
                *entity,
                *range,
            )?;
            trace!(
                "Aligned entity {index} to {} columns with score {}",
                profile.full_len(),
                row.score()
            );
            result.add(row);
        }

        result.expand_within(ranges)
    }
}

impl<AlignatorType: Alignator> MultipleAlignator for ProgressiveAlignator<AlignatorType> {
    fn align_ranges<Storage: AlignmentStorage>(
        &mut self,
        result: &mut MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
        ranges: &[PositionRange],
    ) -> Result<()> {
        result.clear();
        check_entity_count(ranges.len(), entities.len())?;
        let ranges: Vec<_> = entities
            .iter()
            .zip(ranges)
            .map(|(entity, range)| clamp_range(*entity, *range))
            .collect();

        match self.align_progressively(result, entities, &ranges) {
            Ok(()) => {
                debug!(
                    "Aligned {} entities into {} columns",
                    result.num_rows(),
                    result.length()
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

use log::debug;

use crate::{
    alignandum::Alignandum,
    alignator::MultipleAlignator,
    alignment::{Alignment, AlignmentStorage, DenseStorage},
    error::{Error, Result},
};

use super::{GapAggregator, MultAlignment, check_entity_count};

impl<Storage: AlignmentStorage> MultAlignment<Storage> {
    /// Realigns the unmapped residues of every insertion slot whose aggregated gap count exceeds `threshold`.
    ///
    /// For each such slot, the residues of each row in that slot are aligned with `alignator`.
    /// The resulting columns are opened at the position of the slot and the realigned residues are merged into the rows.
    /// Already mapped columns keep their relative order. On error, `self` is left unchanged.
    pub fn realign_patchwork<AlignatorType: MultipleAlignator>(
        &mut self,
        entities: &[&dyn Alignandum],
        alignator: &mut AlignatorType,
        aggregator: GapAggregator,
        threshold: usize,
    ) -> Result<()> {
        check_entity_count(entities.len(), self.num_rows())?;
        if self.is_empty() {
            return Ok(());
        }

        let ranges = self.entity_ranges(entities)?;
        let insertions = self.insertions(&ranges);
        let counts = self.aggregate_slots(&insertions, aggregator);

        let mut patched = self.clone();
        let mut offset = 0;
        for (slot, count) in counts.into_iter().enumerate() {
            if count <= threshold {
                continue;
            }

            let windows: Vec<_> = insertions
                .iter()
                .map(|row_insertions| {
                    row_insertions
                        .iter()
                        .find(|insertion| insertion.slot == slot)
                        .map(|insertion| insertion.residues)
                        .unwrap_or_default()
                })
                .collect();

            let mut fragment = MultAlignment::<Storage>::new();
            alignator.align_ranges(&mut fragment, entities, &windows)?;
            let width = fragment.length();
            if width == 0 {
                continue;
            }

            let position = slot + offset;
            patched.open_columns(position, width)?;
            fragment.shift(signed(position)?)?;
            patched.merge(&fragment)?;
            offset += width;

            debug!("Realigned slot {slot} with aggregated gap count {count} into {width} columns");
        }

        *self = patched;
        Ok(())
    }

    /// Moves all columns from `position` onwards `width` columns to the right.
    fn open_columns(&mut self, position: usize, width: usize) -> Result<()> {
        let length = self.length();
        if position >= length {
            return Ok(());
        }

        let mut recoding = Alignment::<DenseStorage>::new();
        recoding.add_diagonal(0, position, 0)?;
        recoding.add_diagonal(position, length, signed(width)?)?;
        self.map(&recoding)
    }
}

fn signed(position: usize) -> Result<isize> {
    isize::try_from(position).map_err(|_| Error::InvalidPosition {
        position: position as i128,
    })
}

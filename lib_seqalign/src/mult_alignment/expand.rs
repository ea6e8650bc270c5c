//! Insertion slots and the expansion of a multiple alignment.
//!
//! Residues of a row that are not mapped to any column belong to an insertion slot.
//! Slot `0` holds the residues before the first mapped residue,
//! slot `c` for `0 < c < length` the residues directly before the residue mapped to column `c`,
//! and slot `length` the residues after the last mapped residue.
//! Leading and trailing residues only exist if the range of the row's entity is known.

use log::debug;

use crate::{
    alignandum::Alignandum,
    alignment::{Alignment, AlignmentStorage, PositionRange},
    error::Result,
};

use super::{GapAggregator, MultAlignment, check_entity_count};

/// The unmapped residues of one row in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Insertion {
    pub slot: usize,
    pub residues: PositionRange,
}

impl<Storage: AlignmentStorage> MultAlignment<Storage> {
    /// Gives every unmapped residue of every row its own column.
    ///
    /// The inserted columns of a slot are placed directly before the column of the slot,
    /// grouped by row in row order. Leading and trailing residues are taken from the active ranges of `entities`,
    /// which must be empty or contain one entity per row.
    pub fn expand(&mut self, entities: &[&dyn Alignandum]) -> Result<()> {
        let ranges = self.entity_ranges(entities)?;
        self.expand_ranges(&ranges)
    }

    /// Like [`expand`](Self::expand), but takes leading and trailing residues from the given ranges.
    pub fn expand_within(&mut self, ranges: &[PositionRange]) -> Result<()> {
        check_entity_count(ranges.len(), self.num_rows())?;
        let ranges: Vec<_> = ranges.iter().copied().map(Some).collect();
        self.expand_ranges(&ranges)
    }

    /// Counts the unmapped residues of each insertion slot and aggregates them over all rows.
    ///
    /// The result has `length + 1` entries, one per slot.
    pub fn gap_counts(
        &self,
        entities: &[&dyn Alignandum],
        aggregator: GapAggregator,
    ) -> Result<Vec<usize>> {
        let ranges = self.entity_ranges(entities)?;
        Ok(self.aggregate_slots(&self.insertions(&ranges), aggregator))
    }

    pub(crate) fn aggregate_slots(
        &self,
        insertions: &[Vec<Insertion>],
        aggregator: GapAggregator,
    ) -> Vec<usize> {
        let mut counts = vec![vec![0; self.num_rows()]; self.length() + 1];
        for (row, row_insertions) in insertions.iter().enumerate() {
            for insertion in row_insertions {
                counts[insertion.slot][row] += insertion.residues.len();
            }
        }

        counts
            .iter()
            .map(|slot_counts| aggregator.aggregate(slot_counts))
            .collect()
    }

    /// The insertions of all rows, each in ascending slot order.
    pub(crate) fn insertions(&self, ranges: &[Option<PositionRange>]) -> Vec<Vec<Insertion>> {
        let length = self.length();
        self.rows
            .iter()
            .zip(ranges)
            .map(|(row, range)| row_insertions(row, *range, length))
            .collect()
    }

    fn expand_ranges(&mut self, ranges: &[Option<PositionRange>]) -> Result<()> {
        let length = self.length();
        let insertions = self.insertions(ranges);

        let mut widths = vec![0; length + 1];
        for insertion in insertions.iter().flatten() {
            widths[insertion.slot] += insertion.residues.len();
        }
        let mut block_offsets = Vec::with_capacity(length + 1);
        let mut inserted = 0;
        for (slot, width) in widths.iter().enumerate() {
            block_offsets.push(slot + inserted);
            inserted += width;
        }
        if inserted == 0 {
            return Ok(());
        }

        let mut filled = vec![0; length + 1];
        let mut expanded_rows = Vec::with_capacity(self.num_rows());
        for (row, row_insertions) in self.rows.iter().zip(insertions) {
            let mut expanded = Alignment::new();
            for pair in row.iter() {
                expanded.add_pair(
                    block_offsets[pair.row] + widths[pair.row],
                    pair.col,
                    pair.score,
                )?;
            }
            for Insertion { slot, residues } in row_insertions {
                let offset = block_offsets[slot] + filled[slot];
                for (index, residue) in residues.range().enumerate() {
                    expanded.add_pair(offset + index, residue, 0.0)?;
                }
                filled[slot] += residues.len();
            }
            expanded.set_score(row.score());
            expanded_rows.push(expanded);
        }

        debug!("Expanded multiple alignment from {length} to {} columns", length + inserted);
        self.rows = expanded_rows;
        Ok(())
    }
}

fn row_insertions<Storage: AlignmentStorage>(
    row: &Alignment<Storage>,
    range: Option<PositionRange>,
    length: usize,
) -> Vec<Insertion> {
    let mut insertions = Vec::new();
    let mut push = |slot, from, to| {
        let residues = PositionRange::new(from, to);
        if !residues.is_empty() {
            insertions.push(Insertion { slot, residues });
        }
    };

    let mut previous = None;
    for pair in row.iter() {
        match previous {
            None => {
                if let Some(range) = range {
                    push(0, range.offset(), pair.col);
                }
            }
            Some(previous) => push(pair.row, previous + 1, pair.col),
        }
        previous = Some(pair.col);
    }

    if let Some(range) = range {
        match previous {
            Some(previous) => push(length, previous + 1, range.limit()),
            None => push(0, range.offset(), range.limit()),
        }
    }

    insertions
}

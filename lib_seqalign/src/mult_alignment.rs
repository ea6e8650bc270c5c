use crate::{
    alignandum::Alignandum,
    alignment::{Alignment, AlignmentStorage, DenseStorage, PositionRange},
    error::{Error, Result},
};

pub mod compose;
pub mod expand;
pub mod patchwork;


/// A multiple alignment of several entities.
///
/// Each row is an [`Alignment`] that maps the columns of the multiple alignment (its rows)
/// to the positions of one entity (its columns). Column positions that a row does not map are gaps of that row.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultAlignment<Storage = DenseStorage> {
    rows: Vec<Alignment<Storage>>,
}

/// Combines the per-row residue counts of an insertion slot into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GapAggregator {
    /// The total number of inserted residues.
    Sum,
    /// The number of rows with at least one inserted residue.
    Count,
    Min,
    Max,
}

impl<Storage: AlignmentStorage> MultAlignment<Storage> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an empty multiple alignment using the same storage strategy as `self`.
    pub fn new_empty(&self) -> Self {
        Self::new()
    }

    /// Appends a row mapping the columns of this multiple alignment to the positions of an entity.
    pub fn add(&mut self, row: Alignment<Storage>) {
        self.rows.push(row);
    }

    /// Appends the rows of `other`, translating its columns to the columns of `self` via `map_other_to_this`.
    ///
    /// Columns of `other` that are not mapped are dropped.
    pub fn add_mult_alignment<OtherStorage: AlignmentStorage, MapStorage: AlignmentStorage>(
        &mut self,
        other: &MultAlignment<OtherStorage>,
        map_other_to_this: &Alignment<MapStorage>,
    ) -> Result<()> {
        let mut rows = Vec::with_capacity(other.num_rows());
        for other_row in other.rows() {
            let mut row = Alignment::new();
            for pair in other_row.iter() {
                if let Some(column) = map_other_to_this.map_row_to_col(pair.row) {
                    row.add_pair(column, pair.col, pair.score)?;
                }
            }
            rows.push(row);
        }

        self.rows.extend(rows);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Option<&Alignment<Storage>> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> std::slice::Iter<'_, Alignment<Storage>> {
        self.rows.iter()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns, which is one past the last column mapped by any row.
    pub fn length(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.row_to())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if any row maps `column`.
    pub fn is_aligned(&self, column: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.map_row_to_col(column).is_some())
    }

    /// Removes and returns the row at `index`.
    pub fn erase_row(&mut self, index: usize) -> Option<Alignment<Storage>> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Renders each row as a gapped string, using `texts[i]` for the residues of row `i`.
    pub fn to_gapped_strings(&self, texts: &[&str]) -> Result<Vec<String>> {
        check_entity_count(texts.len(), self.num_rows())?;
        let length = self.length();

        self.rows
            .iter()
            .zip(texts)
            .map(|(row, text)| {
                let residues: Vec<char> = text.chars().collect();
                (0..length)
                    .map(|column| match row.map_row_to_col(column) {
                        Some(position) => {
                            residues
                                .get(position)
                                .copied()
                                .ok_or(Error::InvalidPosition {
                                    position: position as i128,
                                })
                        }
                        None => Ok('-'),
                    })
                    .collect::<Result<String>>()
            })
            .collect()
    }

    /// The ranges from which leading and trailing residues are taken.
    ///
    /// Without entities, no leading and trailing residues exist.
    pub(crate) fn entity_ranges(
        &self,
        entities: &[&dyn Alignandum],
    ) -> Result<Vec<Option<PositionRange>>> {
        if entities.is_empty() {
            return Ok(vec![None; self.num_rows()]);
        }

        check_entity_count(entities.len(), self.num_rows())?;
        Ok(entities
            .iter()
            .map(|entity| Some(entity.active_range()))
            .collect())
    }
}

impl GapAggregator {
    pub fn aggregate(&self, counts: &[usize]) -> usize {
        let counts = counts.iter().copied();
        match self {
            GapAggregator::Sum => counts.sum(),
            GapAggregator::Count => counts.filter(|&count| count > 0).count(),
            GapAggregator::Min => counts.min().unwrap_or(0),
            GapAggregator::Max => counts.max().unwrap_or(0),
        }
    }
}

pub(crate) fn check_entity_count(entities: usize, rows: usize) -> Result<()> {
    if entities == rows {
        Ok(())
    } else {
        Err(Error::IncompatibleReference {
            reason: format!("{entities} entities were given for {rows} rows"),
        })
    }
}

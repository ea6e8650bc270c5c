use log::trace;

use crate::{
    alignment::{Alignment, AlignmentStorage},
    error::{Error, Result},
};

use super::MultAlignment;

impl<Storage: AlignmentStorage> MultAlignment<Storage> {
    /// Moves all rows by `offset` columns.
    ///
    /// Fails without changing anything if a column would become negative or too large.
    pub fn shift(&mut self, offset: isize) -> Result<()> {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.shift_rows(offset)?;
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        self.rows = rows;
        Ok(())
    }

    /// Moves every column `c` to column `recoding.map_row_to_col(c)`.
    ///
    /// Fails without changing anything if a mapped column has no image under `recoding`.
    pub fn map<RecodingStorage: AlignmentStorage>(
        &mut self,
        recoding: &Alignment<RecodingStorage>,
    ) -> Result<()> {
        let mut rows = Vec::with_capacity(self.num_rows());
        for row in &self.rows {
            let mut mapped = Alignment::new();
            for pair in row.iter() {
                let column = recoding.map_row_to_col(pair.row).ok_or_else(|| {
                    Error::IncompatibleReference {
                        reason: format!("column {} is not mapped by the recoding", pair.row),
                    }
                })?;
                mapped.add_pair(column, pair.col, pair.score)?;
            }
            mapped.set_score(row.score());
            rows.push(mapped);
        }

        self.rows = rows;
        Ok(())
    }

    /// Adds the pairs of each row of `other` to the corresponding row of `self`.
    ///
    /// Fails without changing anything if the row counts differ, if a column or residue
    /// is mapped by both, or if a merged row would not be monotone.
    pub fn merge<OtherStorage: AlignmentStorage>(
        &mut self,
        other: &MultAlignment<OtherStorage>,
    ) -> Result<()> {
        if other.num_rows() != self.num_rows() {
            return Err(Error::IncompatibleReference {
                reason: format!(
                    "cannot merge {} rows into {} rows",
                    other.num_rows(),
                    self.num_rows()
                ),
            });
        }

        for (index, (row, other_row)) in self.rows.iter().zip(other.rows()).enumerate() {
            check_mergeable(index, row, other_row)?;
        }

        for (row, other_row) in self.rows.iter_mut().zip(other.rows()) {
            let score = row.score() + other_row.score();
            for pair in other_row.iter() {
                row.add_pair(pair.row, pair.col, pair.score)?;
            }
            row.set_score(score);
        }

        trace!("Merged {} rows", other.num_rows());
        Ok(())
    }
}

fn check_mergeable<Storage: AlignmentStorage, OtherStorage: AlignmentStorage>(
    index: usize,
    row: &Alignment<Storage>,
    other_row: &Alignment<OtherStorage>,
) -> Result<()> {
    for pair in other_row.iter() {
        if row.map_row_to_col(pair.row).is_some() {
            return Err(Error::IncompatibleReference {
                reason: format!("column {} of row {index} is mapped twice", pair.row),
            });
        }
        if row.map_col_to_row(pair.col).is_some() {
            return Err(Error::IncompatibleReference {
                reason: format!("residue {} of row {index} is mapped twice", pair.col),
            });
        }
    }

    let mut pairs: Vec<_> = row
        .iter()
        .chain(other_row.iter())
        .map(|pair| (pair.row, pair.col))
        .collect();
    pairs.sort_unstable();
    if pairs.windows(2).any(|window| window[0].1 >= window[1].1) {
        return Err(Error::IncompatibleReference {
            reason: format!("merging row {index} would make it non-monotone"),
        });
    }

    Ok(())
}

use ndarray::ArrayView1;

use crate::{
    alignandum::{Alignandum, Column},
    error::{Error, Result},
};

pub use substitution_matrix::SubstitutionMatrix;

mod blosum62;
pub mod substitution_matrix;

/// Computes the score of aligning two positions.
///
/// Aligners call [`validate`](Scorer::validate) once before scoring any positions of an entity pair.
pub trait Scorer {
    fn validate(&self, row: &dyn Alignandum, col: &dyn Alignandum) -> Result<()>;

    fn score(&self, row: &Column<'_>, col: &Column<'_>) -> f64;
}

impl Scorer for SubstitutionMatrix {
    fn validate(&self, row: &dyn Alignandum, col: &dyn Alignandum) -> Result<()> {
        if row.alphabet_size() != self.size() || col.alphabet_size() != self.size() {
            return Err(Error::IncompatibleScorer {
                expected: self.size(),
                row: row.alphabet_size(),
                col: col.alphabet_size(),
            });
        }
        Ok(())
    }

    /// Residues are looked up directly. Distributions contribute the expected score over their frequencies.
    ///
    /// Profiles with log-odds scores are scored through those instead of the matrix.
    /// A residue takes the profile's score for it. Two profiles score each one's log-odds
    /// against the other's frequencies, summed over both directions.
    fn score(&self, row: &Column<'_>, col: &Column<'_>) -> f64 {
        match (row, col) {
            (Column::Masked, _) | (_, Column::Masked) => 0.0,
            (Column::Residue(residue), Column::Profile { scores, .. }) => {
                scores.get(usize::from(*residue)).copied().unwrap_or(0.0)
            }
            (Column::Profile { scores, .. }, Column::Residue(residue)) => {
                scores.get(usize::from(*residue)).copied().unwrap_or(0.0)
            }
            (
                Column::Profile {
                    frequencies: row_frequencies,
                    scores: row_scores,
                },
                Column::Profile {
                    frequencies: col_frequencies,
                    scores: col_scores,
                },
            ) => dot(row_scores, col_frequencies) + dot(col_scores, row_frequencies),
            (Column::Profile { scores, .. }, Column::Distribution(frequencies)) => {
                dot(scores, frequencies)
            }
            (Column::Distribution(frequencies), Column::Profile { scores, .. }) => {
                dot(scores, frequencies)
            }
            (Column::Residue(row), Column::Residue(col)) => self.get(*row, *col),
            (Column::Residue(row), Column::Distribution(col)) => col
                .iter()
                .enumerate()
                .filter(|(_, frequency)| **frequency != 0.0)
                .map(|(code, frequency)| frequency * self.get(*row, code as u8))
                .sum(),
            (Column::Distribution(row), Column::Residue(col)) => row
                .iter()
                .enumerate()
                .filter(|(_, frequency)| **frequency != 0.0)
                .map(|(code, frequency)| frequency * self.get(code as u8, *col))
                .sum(),
            (Column::Distribution(row), Column::Distribution(col)) => {
                let mut score = 0.0;
                for (row_code, row_frequency) in row.iter().enumerate() {
                    if *row_frequency == 0.0 {
                        continue;
                    }
                    for (col_code, col_frequency) in col.iter().enumerate() {
                        if *col_frequency != 0.0 {
                            score += row_frequency
                                * col_frequency
                                * self.get(row_code as u8, col_code as u8);
                        }
                    }
                }
                score
            }
        }
    }
}

fn dot(scores: &ArrayView1<'_, f64>, frequencies: &ArrayView1<'_, f64>) -> f64 {
    scores
        .iter()
        .zip(frequencies)
        .filter(|(_, frequency)| **frequency != 0.0)
        .map(|(score, frequency)| score * frequency)
        .sum()
}

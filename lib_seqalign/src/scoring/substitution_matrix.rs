use crate::error::{Error, Result};

use super::blosum62::BLOSUM62;

/// A square table of residue substitution scores, indexed by residue codes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedSubstitutionMatrix"))]
pub struct SubstitutionMatrix {
    size: usize,
    scores: Vec<f64>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UncheckedSubstitutionMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SubstitutionMatrix {
    /// Create a matrix from its scores in row-major order.
    pub fn new(size: usize, scores: Vec<f64>) -> Result<Self> {
        let expected = size.checked_mul(size);
        if expected != Some(scores.len()) {
            return Err(Error::SubstitutionMatrixSize {
                size,
                expected: expected.unwrap_or(usize::MAX),
                actual: scores.len(),
            });
        }

        Ok(Self { size, scores })
    }

    pub fn match_mismatch(size: usize, match_score: f64, mismatch_score: f64) -> Self {
        let scores = (0..size)
            .flat_map(|row| {
                (0..size).map(move |col| {
                    if row == col {
                        match_score
                    } else {
                        mismatch_score
                    }
                })
            })
            .collect();
        Self { size, scores }
    }

    /// The BLOSUM62 matrix over the protein alphabet `ARNDCQEGHILKMFPSTWYVBZX`.
    pub fn blosum62() -> Self {
        Self {
            size: 23,
            scores: BLOSUM62.iter().flatten().map(|&score| f64::from(score)).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Residue codes outside of the matrix score zero.
    pub fn get(&self, row: u8, col: u8) -> f64 {
        let (row, col) = (usize::from(row), usize::from(col));
        if row < self.size && col < self.size {
            self.scores[row * self.size + col]
        } else {
            0.0
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedSubstitutionMatrix> for SubstitutionMatrix {
    type Error = Error;

    fn try_from(matrix: UncheckedSubstitutionMatrix) -> Result<Self> {
        Self::new(matrix.size, matrix.scores)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::SubstitutionMatrix;

    #[test]
    fn blosum62_is_symmetric() {
        let matrix = SubstitutionMatrix::blosum62();
        for row in 0..23 {
            for col in 0..23 {
                assert_eq!(matrix.get(row, col), matrix.get(col, row));
            }
        }
        assert_eq!(matrix.get(22, 22), -1.0);
        assert_eq!(matrix.get(4, 4), 9.0);
    }

    #[test]
    fn match_mismatch() {
        let matrix = SubstitutionMatrix::match_mismatch(4, 1.0, -1000.0);
        assert_eq!(matrix.get(2, 2), 1.0);
        assert_eq!(matrix.get(2, 3), -1000.0);
        assert_eq!(matrix.get(2, 4), 0.0);
    }

    #[test]
    fn wrong_number_of_scores() {
        assert!(SubstitutionMatrix::new(2, vec![1.0, 0.0, 0.0, 1.0]).is_ok());
        assert!(matches!(
            SubstitutionMatrix::new(2, vec![1.0; 3]),
            Err(Error::SubstitutionMatrixSize {
                size: 2,
                expected: 4,
                actual: 3
            })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialisation_checks_the_number_of_scores() {
        let matrix: SubstitutionMatrix =
            toml::from_str("size = 2\nscores = [1.0, -1.0, -1.0, 1.0]").unwrap();
        assert_eq!(matrix, SubstitutionMatrix::match_mismatch(2, 1.0, -1.0));

        let truncated = toml::from_str::<SubstitutionMatrix>("size = 3\nscores = [1.0]");
        assert!(truncated.is_err());
    }
}

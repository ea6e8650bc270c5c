use std::fmt::Display;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
mod io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlignmentMode {
    /// Both entities are aligned end to end.
    Global,
    /// The best scoring pair of segments is aligned.
    #[default]
    Local,
    /// Like local, but the column entity is treated as circular.
    Wrap,
    /// Each row position is greedily paired with its best column after the previous pair.
    Groupies,
}

/// Selects which end gaps are penalised.
///
/// A leading gap in the row means that the alignment starts after the first column position, and so on.
/// Unpenalised end gaps only affect [`AlignmentMode::Global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EndGapPolicy {
    pub penalize_row_leading: bool,
    pub penalize_row_trailing: bool,
    pub penalize_col_leading: bool,
    pub penalize_col_trailing: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlignatorConfig {
    pub mode: AlignmentMode,
    /// Score of the first position of a gap.
    pub gap_open: f64,
    /// Score of every further position of a gap.
    pub gap_extend: f64,
    pub end_gaps: EndGapPolicy,
    /// The maximum number of matrix cells a single alignment may visit.
    pub cell_limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IterativeConfig {
    /// Alignments need a score strictly above this to be accepted.
    pub min_score: f64,
}

impl EndGapPolicy {
    pub fn penalize_all() -> Self {
        Self {
            penalize_row_leading: true,
            penalize_row_trailing: true,
            penalize_col_leading: true,
            penalize_col_trailing: true,
        }
    }

    pub fn penalize_none() -> Self {
        Self::default()
    }
}

impl AlignatorConfig {
    pub fn new(mode: AlignmentMode, gap_open: f64, gap_extend: f64) -> Self {
        Self {
            mode,
            gap_open,
            gap_extend,
            ..Default::default()
        }
    }

    pub fn with_end_gaps(mut self, end_gaps: EndGapPolicy) -> Self {
        self.end_gaps = end_gaps;
        self
    }

    pub fn with_cell_limit(mut self, cell_limit: u64) -> Self {
        self.cell_limit = Some(cell_limit);
        self
    }

    /// Returns an error if a gap penalty is positive or not finite.
    pub fn verify(&self) -> Result<()> {
        for value in [self.gap_open, self.gap_extend] {
            if !value.is_finite() {
                return Err(Error::NonFiniteGapPenalty { value });
            }
            if value > 0.0 {
                return Err(Error::PositiveGapPenalty { value });
            }
        }
        Ok(())
    }

    /// The score of a gap of the given length.
    pub fn gap_score(&self, length: usize) -> f64 {
        if length == 0 {
            0.0
        } else {
            self.gap_open + (length - 1) as f64 * self.gap_extend
        }
    }
}

impl Default for AlignatorConfig {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Local,
            gap_open: -10.0,
            gap_extend: -1.0,
            end_gaps: EndGapPolicy::default(),
            cell_limit: None,
        }
    }
}

impl Default for IterativeConfig {
    fn default() -> Self {
        Self { min_score: 0.0 }
    }
}

impl Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignmentMode::Global => write!(f, "global"),
            AlignmentMode::Local => write!(f, "local"),
            AlignmentMode::Wrap => write!(f, "wrap"),
            AlignmentMode::Groupies => write!(f, "groupies"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    use super::{AlignatorConfig, AlignmentMode, EndGapPolicy};

    #[test]
    fn defaults() {
        let config = AlignatorConfig::default();
        assert_eq!(config.mode, AlignmentMode::Local);
        assert_eq!(config.gap_open, -10.0);
        assert_eq!(config.gap_extend, -1.0);
        assert_eq!(config.end_gaps, EndGapPolicy::penalize_none());
        assert!(config.verify().is_ok());
    }

    #[test]
    fn gap_penalties_are_verified() {
        assert!(matches!(
            AlignatorConfig::new(AlignmentMode::Global, 1.0, -1.0).verify(),
            Err(Error::PositiveGapPenalty { value }) if value == 1.0
        ));
        assert!(matches!(
            AlignatorConfig::new(AlignmentMode::Global, -1.0, f64::NEG_INFINITY).verify(),
            Err(Error::NonFiniteGapPenalty { .. })
        ));
        assert!(matches!(
            AlignatorConfig::new(AlignmentMode::Global, f64::NAN, -1.0).verify(),
            Err(Error::NonFiniteGapPenalty { .. })
        ));
        assert!(AlignatorConfig::new(AlignmentMode::Wrap, 0.0, 0.0).verify().is_ok());
    }

    #[test]
    fn affine_gap_scores() {
        let config = AlignatorConfig::new(AlignmentMode::Global, -10.0, -2.0);
        assert_eq!(config.gap_score(0), 0.0);
        assert_eq!(config.gap_score(1), -10.0);
        assert_eq!(config.gap_score(4), -16.0);
    }
}

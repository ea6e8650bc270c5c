//! The steps that turn aligned residues into the scoring statistics of a [`Profile`](super::Profile).
//!
//! Sequences are weighted when their residues are counted.
//! [`prepare`](crate::alignandum::Alignandum::prepare) then regularises the counts into frequencies
//! and optionally converts the frequencies into log-odds scores against a background distribution.

use ndarray::{Array2, ArrayView2, Axis};

use crate::{
    alignandum::Encoder,
    error::{Error, Result},
};

/// Weights are raised to at least this value before they are rescaled.
pub const MIN_WEIGHT: f64 = 1e-4;

/// Columns with at least this many observations are not regularised by default.
pub const DEFAULT_FADE_CUTOFF: f64 = 10.0;

/// The log-odds score of residues that were never observed in a column.
pub const DEFAULT_MASK_VALUE: f64 = -10.0;

/// How much each aligned sequence contributes to the counts of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weightor {
    /// Every sequence counts once.
    #[default]
    None,
    /// Position-based weights after Henikoff & Henikoff, scaled to sum to one.
    Henikoff,
    /// Henikoff weights scaled to sum to the number of sequences.
    HenikoffKimmen,
}

/// How counts become frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Regularizor {
    /// Frequencies are the counts divided by their column total.
    #[default]
    None,
    /// Columns with fewer than `fade_cutoff` observations receive `pseudocounts` observations
    /// distributed like the background.
    /// Better observed columns use their raw frequencies.
    DirichletFade { pseudocounts: f64, fade_cutoff: f64 },
}

/// How frequencies become position-specific scores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LogOddor {
    /// The profile is scored through its frequencies.
    #[default]
    None,
    /// Scores are `ln(frequency / background) / scale`.
    /// Residues with frequency or background zero score `mask_value`.
    Background { scale: f64, mask_value: f64 },
}

/// The weighting, regularisation and log-odds steps of a profile.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileStatistics {
    pub weightor: Weightor,
    pub regularizor: Regularizor,
    pub log_oddor: LogOddor,
    /// Background frequencies indexed by residue code.
    /// If unset, all residues except the mask are equally likely.
    pub background: Option<Vec<f64>>,
}

impl Weightor {
    /// Computes one weight per sequence.
    ///
    /// `residues[i][column]` is the residue code of sequence `i` in `column`, or `None` for gaps and masked residues.
    pub fn weights(&self, residues: &[Vec<Option<u8>>], alphabet_size: usize) -> Vec<f64> {
        match self {
            Weightor::None => vec![1.0; residues.len()],
            Weightor::Henikoff => rescale(henikoff(residues, alphabet_size), 1.0),
            Weightor::HenikoffKimmen => {
                rescale(henikoff(residues, alphabet_size), residues.len() as f64)
            }
        }
    }
}

impl Regularizor {
    /// Computes the frequencies of `counts`, which has one row per profile column.
    pub fn frequencies(&self, counts: ArrayView2<f64>, background: &[f64]) -> Array2<f64> {
        let mut frequencies = counts.to_owned();
        for mut column in frequencies.axis_iter_mut(Axis(0)) {
            let total = column.sum();
            match *self {
                Regularizor::DirichletFade {
                    pseudocounts,
                    fade_cutoff,
                } if total < fade_cutoff && total + pseudocounts > 0.0 => {
                    for (frequency, background) in column.iter_mut().zip(background) {
                        *frequency =
                            (*frequency + pseudocounts * background) / (total + pseudocounts);
                    }
                }
                _ => {
                    if total > 0.0 {
                        column.mapv_inplace(|count| count / total);
                    }
                }
            }
        }
        frequencies
    }
}

impl LogOddor {
    /// Computes the log-odds scores of `frequencies`, or `None` if profiles are scored through their frequencies.
    pub fn scores(&self, frequencies: ArrayView2<f64>, background: &[f64]) -> Option<Array2<f64>> {
        let LogOddor::Background { scale, mask_value } = *self else {
            return None;
        };

        let mut scores = frequencies.to_owned();
        for mut column in scores.axis_iter_mut(Axis(0)) {
            for (score, background) in column.iter_mut().zip(background) {
                *score = if *score > 0.0 && *background > 0.0 {
                    (*score / background).ln() / scale
                } else {
                    mask_value
                };
            }
        }
        Some(scores)
    }
}

impl ProfileStatistics {
    pub fn henikoff() -> Self {
        Self {
            weightor: Weightor::Henikoff,
            ..Default::default()
        }
    }

    pub fn with_weightor(mut self, weightor: Weightor) -> Self {
        self.weightor = weightor;
        self
    }

    pub fn with_regularizor(mut self, regularizor: Regularizor) -> Self {
        self.regularizor = regularizor;
        self
    }

    pub fn with_log_oddor(mut self, log_oddor: LogOddor) -> Self {
        self.log_oddor = log_oddor;
        self
    }

    pub fn with_background(mut self, background: Vec<f64>) -> Self {
        self.background = Some(background);
        self
    }

    /// Checks that all parameters are usable with the alphabet of `encoder`.
    pub fn verify(&self, encoder: &Encoder) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidProfileStatistics { reason });

        if let Some(background) = &self.background {
            if background.len() != encoder.alphabet_size() {
                return invalid(format!(
                    "{} background frequencies were given for an alphabet of size {}",
                    background.len(),
                    encoder.alphabet_size()
                ));
            }
            if background
                .iter()
                .any(|frequency| !frequency.is_finite() || *frequency < 0.0)
            {
                return invalid("background frequencies must be finite and non-negative".into());
            }
        }

        if let Regularizor::DirichletFade {
            pseudocounts,
            fade_cutoff,
        } = self.regularizor
        {
            if !pseudocounts.is_finite() || pseudocounts < 0.0 || fade_cutoff.is_nan() {
                return invalid(format!(
                    "pseudocounts {pseudocounts} with fade cutoff {fade_cutoff} cannot be used"
                ));
            }
        }

        if let LogOddor::Background { scale, mask_value } = self.log_oddor {
            if !scale.is_finite() || scale <= 0.0 || !mask_value.is_finite() {
                return invalid(format!(
                    "log-odds scale {scale} with mask value {mask_value} cannot be used"
                ));
            }
        }

        Ok(())
    }

    /// The background frequencies, indexed by the residue codes of `encoder`.
    pub fn background(&self, encoder: &Encoder) -> Vec<f64> {
        if let Some(background) = &self.background {
            return background.clone();
        }

        let size = encoder.alphabet_size();
        let frequency = if size > 1 {
            1.0 / (size - 1) as f64
        } else {
            0.0
        };
        (0..size)
            .map(|code| {
                if code == usize::from(encoder.mask_code()) {
                    0.0
                } else {
                    frequency
                }
            })
            .collect()
    }
}

fn henikoff(residues: &[Vec<Option<u8>>], alphabet_size: usize) -> Vec<f64> {
    let length = residues.iter().map(Vec::len).max().unwrap_or(0);
    let known = |residue: &Option<u8>| residue.map(usize::from).filter(|&code| code < alphabet_size);

    let mut counts = Array2::<usize>::zeros((length, alphabet_size));
    for sequence in residues {
        for (column, residue) in sequence.iter().enumerate() {
            if let Some(code) = known(residue) {
                counts[[column, code]] += 1;
            }
        }
    }
    let types: Vec<usize> = counts
        .axis_iter(Axis(0))
        .map(|column| column.iter().filter(|&&count| count > 0).count())
        .collect();

    residues
        .iter()
        .map(|sequence| {
            sequence
                .iter()
                .enumerate()
                .filter_map(|(column, residue)| {
                    known(residue).map(|code| 1.0 / (counts[[column, code]] * types[column]) as f64)
                })
                .sum::<f64>()
        })
        .collect()
}

fn rescale(mut weights: Vec<f64>, total: f64) -> Vec<f64> {
    for weight in &mut weights {
        *weight = weight.max(MIN_WEIGHT);
    }

    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        let factor = total / sum;
        for weight in &mut weights {
            *weight *= factor;
        }
    }
    weights
}

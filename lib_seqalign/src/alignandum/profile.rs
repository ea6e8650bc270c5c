use bitvec::vec::BitVec;
use log::debug;
use ndarray::Array2;

use crate::{
    alignment::{Alignment, AlignmentStorage, PositionRange},
    error::{Error, Result},
    mult_alignment::{MultAlignment, check_entity_count},
};

use super::{Alignandum, AlignandumKind, Column, Encoder, clamp_segment};

use statistics::ProfileStatistics;

pub mod statistics;

/// Per-position residue counts of a set of aligned sequences.
///
/// Scoring uses the residue frequencies and, if the statistics ask for them, log-odds scores.
/// Both only exist after [`prepare`](Alignandum::prepare) and are dropped again by [`release`](Alignandum::release).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    /// Positions times residue codes.
    counts: Array2<f64>,
    frequencies: Option<Array2<f64>>,
    log_odds: Option<Array2<f64>>,
    mask: BitVec,
    active_range: PositionRange,
    encoder: Encoder,
    #[cfg_attr(feature = "serde", serde(default))]
    statistics: ProfileStatistics,
}

/// The contribution of one source position to one profile column.
struct Contribution {
    column: usize,
    residue: Option<u8>,
    counts: Vec<f64>,
}

impl Profile {
    /// Creates a profile without any counts.
    pub fn new(length: usize, encoder: &Encoder) -> Self {
        Self {
            counts: Array2::zeros((length, encoder.alphabet_size())),
            frequencies: None,
            log_odds: None,
            mask: BitVec::repeat(false, length),
            active_range: PositionRange::new_complete(length),
            encoder: encoder.clone(),
            statistics: ProfileStatistics::default(),
        }
    }

    /// Replaces the statistics used by [`prepare`](Alignandum::prepare). The profile is released.
    ///
    /// The weighting of the statistics only applies to profiles built after it was set,
    /// so prefer the `*_with_statistics` constructors.
    pub fn with_statistics(mut self, statistics: ProfileStatistics) -> Result<Self> {
        statistics.verify(&self.encoder)?;
        self.statistics = statistics;
        self.release();
        Ok(self)
    }

    /// Counts the residues of equally long aligned strings. `-` and `.` are gaps.
    pub fn from_aligned_strings(rows: &[&str], encoder: &Encoder) -> Result<Self> {
        Self::from_aligned_strings_with_statistics(rows, encoder, ProfileStatistics::default())
    }

    /// Like [`from_aligned_strings`](Self::from_aligned_strings), but weights the rows as `statistics` says.
    pub fn from_aligned_strings_with_statistics(
        rows: &[&str],
        encoder: &Encoder,
        statistics: ProfileStatistics,
    ) -> Result<Self> {
        let length = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let profile = Self::new(length, encoder).with_statistics(statistics)?;

        let mut residues = Vec::with_capacity(rows.len());
        for row in rows {
            if row.chars().count() != length {
                return Err(Error::IncompatibleReference {
                    reason: format!("aligned string '{row}' does not have length {length}"),
                });
            }

            residues.push(
                row.chars()
                    .map(|character| {
                        (character != '-' && character != '.')
                            .then(|| encoder.encode_char(character))
                    })
                    .collect::<Vec<_>>(),
            );
        }

        let contributions: Vec<Vec<Contribution>> = residues
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(column, residue)| {
                        residue.map(|residue| profile.residue_contribution(column, residue))
                    })
                    .collect()
            })
            .collect();
        Ok(profile.accumulate_weighted(residues, contributions))
    }

    /// Counts the residues of `entities` in the columns of `mult_alignment`.
    ///
    /// Entity `i` supplies the residues of row `i`.
    pub fn from_mult_alignment<Storage: AlignmentStorage>(
        mult_alignment: &MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
        encoder: &Encoder,
    ) -> Result<Self> {
        Self::from_mult_alignment_with_statistics(
            mult_alignment,
            entities,
            encoder,
            ProfileStatistics::default(),
        )
    }

    /// Like [`from_mult_alignment`](Self::from_mult_alignment), but weights the rows as `statistics` says.
    ///
    /// Only residues of sequences count towards the weights. Profile rows are weighted as if they were all gaps.
    pub fn from_mult_alignment_with_statistics<Storage: AlignmentStorage>(
        mult_alignment: &MultAlignment<Storage>,
        entities: &[&dyn Alignandum],
        encoder: &Encoder,
        statistics: ProfileStatistics,
    ) -> Result<Self> {
        check_entity_count(entities.len(), mult_alignment.num_rows())?;

        let profile = Self::new(mult_alignment.length(), encoder).with_statistics(statistics)?;
        let mut residues = Vec::with_capacity(entities.len());
        let mut contributions = Vec::with_capacity(entities.len());
        for (row, entity) in mult_alignment.rows().zip(entities) {
            let row_contributions = profile.source_contributions(
                *entity,
                row.iter().map(|pair| (pair.col, pair.row)),
            )?;

            let mut row_residues = vec![None; profile.full_len()];
            for contribution in &row_contributions {
                row_residues[contribution.column] = contribution.residue;
            }
            residues.push(row_residues);
            contributions.push(row_contributions);
        }

        let profile = profile.accumulate_weighted(residues, contributions);
        debug!(
            "Built profile of length {} from {} rows",
            profile.full_len(),
            entities.len()
        );
        Ok(profile)
    }

    /// Adds the residues of `source` to the profile columns they are mapped to.
    ///
    /// Sequence residues count once, profiles contribute their frequencies.
    /// Masked columns are left untouched. If the profile is prepared, its statistics are recomputed.
    pub fn add<Storage: AlignmentStorage>(
        &mut self,
        source: &dyn Alignandum,
        map_source_to_profile: &Alignment<Storage>,
    ) -> Result<()> {
        let contributions = self.source_contributions(
            source,
            map_source_to_profile
                .iter()
                .map(|pair| (pair.row, pair.col)),
        )?;
        self.accumulate(contributions, 1.0);

        if self.is_prepared() {
            self.release();
            self.prepare();
        }
        Ok(())
    }

    pub fn counts(&self) -> &Array2<f64> {
        &self.counts
    }

    pub fn frequencies(&self) -> Option<&Array2<f64>> {
        self.frequencies.as_ref()
    }

    /// The log-odds scores, if the profile is prepared and its statistics compute them.
    pub fn log_odds(&self) -> Option<&Array2<f64>> {
        self.log_odds.as_ref()
    }

    pub fn statistics(&self) -> &ProfileStatistics {
        &self.statistics
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    /// The residue with the highest count at `position`, preferring lower codes on ties.
    pub fn most_frequent(&self, position: usize) -> Option<u8> {
        let counts = self.counts.row(position);
        let mut best: Option<(usize, f64)> = None;
        for (code, &count) in counts.iter().enumerate() {
            if count > 0.0 && best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((code, count));
            }
        }
        best.map(|(code, _)| code as u8)
    }

    fn residue_contribution(&self, column: usize, residue: u8) -> Contribution {
        let mut counts = vec![0.0; self.encoder.alphabet_size()];
        if let Some(count) = counts.get_mut(usize::from(residue)) {
            *count = 1.0;
        }
        Contribution {
            column,
            residue: Some(residue),
            counts,
        }
    }

    /// Collects the contributions of `source` for `(source position, profile column)` pairs.
    ///
    /// Fails without side effects if any position is out of range or `source` cannot be scored.
    fn source_contributions(
        &self,
        source: &dyn Alignandum,
        pairs: impl Iterator<Item = (usize, usize)>,
    ) -> Result<Vec<Contribution>> {
        if source.alphabet_size() != self.encoder.alphabet_size() {
            return Err(Error::IncompatibleScorer {
                expected: self.encoder.alphabet_size(),
                row: source.alphabet_size(),
                col: self.encoder.alphabet_size(),
            });
        }

        let mut contributions = Vec::new();
        for (source_position, column) in pairs {
            if column >= self.full_len() {
                return Err(Error::InvalidPosition {
                    position: column as i128,
                });
            }
            if self.is_masked(column) {
                continue;
            }

            match source.column(source_position)? {
                Column::Masked => continue,
                Column::Residue(residue) => {
                    contributions.push(self.residue_contribution(column, residue));
                }
                Column::Distribution(frequencies) | Column::Profile { frequencies, .. } => {
                    let mut counts = vec![0.0; self.encoder.alphabet_size()];
                    for (target, &frequency) in counts.iter_mut().zip(frequencies.iter()) {
                        *target = frequency;
                    }
                    contributions.push(Contribution {
                        column,
                        residue: None,
                        counts,
                    });
                }
            }
        }

        Ok(contributions)
    }

    /// Adds the contributions of each row, weighted by the weightor of the statistics over `residues`.
    fn accumulate_weighted(
        mut self,
        residues: Vec<Vec<Option<u8>>>,
        contributions: Vec<Vec<Contribution>>,
    ) -> Self {
        let weights = self
            .statistics
            .weightor
            .weights(&residues, self.encoder.alphabet_size());
        for (row_contributions, weight) in contributions.into_iter().zip(weights) {
            self.accumulate(row_contributions, weight);
        }
        self
    }

    fn accumulate(&mut self, contributions: Vec<Contribution>, weight: f64) {
        for contribution in contributions {
            for (count, value) in self
                .counts
                .row_mut(contribution.column)
                .iter_mut()
                .zip(contribution.counts)
            {
                *count += weight * value;
            }
        }
    }
}

impl Alignandum for Profile {
    fn kind(&self) -> AlignandumKind {
        AlignandumKind::Profile
    }

    fn full_len(&self) -> usize {
        self.counts.nrows()
    }

    fn active_range(&self) -> PositionRange {
        self.active_range
    }

    fn use_segment(&mut self, from: usize, to: usize) {
        self.active_range = clamp_segment(from, to, self.full_len());
    }

    fn mask(&mut self, position: usize) {
        if position >= self.full_len() {
            return;
        }

        self.mask.set(position, true);
        self.counts.row_mut(position).fill(0.0);
        for statistic in [&mut self.frequencies, &mut self.log_odds]
            .into_iter()
            .flatten()
        {
            statistic.row_mut(position).fill(0.0);
        }
    }

    fn is_masked(&self, position: usize) -> bool {
        self.mask.get(position).is_some_and(|masked| *masked)
    }

    fn is_prepared(&self) -> bool {
        self.frequencies.is_some()
    }

    fn prepare(&mut self) {
        if self.frequencies.is_some() {
            return;
        }

        let background = self.statistics.background(&self.encoder);
        let mut frequencies = self
            .statistics
            .regularizor
            .frequencies(self.counts.view(), &background);
        for position in self.mask.iter_ones() {
            frequencies.row_mut(position).fill(0.0);
        }

        self.log_odds = self
            .statistics
            .log_oddor
            .scores(frequencies.view(), &background);
        self.frequencies = Some(frequencies);
    }

    fn release(&mut self) {
        self.frequencies = None;
        self.log_odds = None;
    }

    fn alphabet_size(&self) -> usize {
        self.encoder.alphabet_size()
    }

    fn column(&self, position: usize) -> Result<Column<'_>> {
        if position >= self.full_len() {
            return Err(Error::InvalidPosition {
                position: position as i128,
            });
        }
        if self.is_masked(position) {
            return Ok(Column::Masked);
        }

        let frequencies = self.frequencies.as_ref().ok_or(Error::Unprepared)?;
        Ok(match &self.log_odds {
            Some(scores) => Column::Profile {
                frequencies: frequencies.row(position),
                scores: scores.row(position),
            },
            None => Column::Distribution(frequencies.row(position)),
        })
    }

    fn as_char(&self, position: usize) -> char {
        if self.is_masked(position) {
            return self.encoder.mask_char();
        }
        if position >= self.full_len() {
            return '-';
        }
        self.most_frequent(position)
            .map(|residue| self.encoder.decode(residue))
            .unwrap_or('-')
    }
}

use std::{fmt::Display, ops::Range};

/// A half-open range `[offset, limit)` of 0-based positions.
///
/// Ranges with `offset >= limit` are empty.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRange {
    offset: usize,
    limit: usize,
}

/// The minimal ranges of rows and columns covering all pairs of a non-empty alignment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentBounds {
    pub row: PositionRange,
    pub col: PositionRange,
}

impl PositionRange {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    pub fn new_complete(length: usize) -> Self {
        Self::new(0, length)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.limit.saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.limit
    }

    pub fn contains(&self, position: usize) -> bool {
        self.offset <= position && position < self.limit
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.limit.max(self.offset)
    }

    /// Returns the overlap of both ranges, which may be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        let offset = self.offset.max(other.offset);
        Self::new(offset, self.limit.min(other.limit).max(offset))
    }
}

impl From<Range<usize>> for PositionRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl AlignmentBounds {
    pub(crate) fn single(row: usize, col: usize) -> Self {
        Self {
            row: PositionRange::new(row, row + 1),
            col: PositionRange::new(col, col + 1),
        }
    }

    pub(crate) fn extend(&mut self, row: usize, col: usize) {
        self.row.offset = self.row.offset.min(row);
        self.row.limit = self.row.limit.max(row + 1);
        self.col.offset = self.col.offset.min(col);
        self.col.limit = self.col.limit.max(col + 1);
    }

    pub(crate) fn transposed(&self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }
}

impl Display for PositionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.offset, self.limit)
    }
}

impl Display for AlignmentBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R: {}; C: {}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::PositionRange;

    #[test]
    fn empty_and_inverted_ranges() {
        assert!(PositionRange::new(3, 3).is_empty());
        assert!(PositionRange::new(5, 3).is_empty());
        assert_eq!(PositionRange::new(5, 3).len(), 0);
        assert_eq!(PositionRange::new(5, 3).range().count(), 0);
        assert!(!PositionRange::new(3, 5).is_empty());
    }

    #[test]
    fn intersection() {
        let range = PositionRange::new(2, 10);
        assert_eq!(
            range.intersect(&PositionRange::new(5, 20)),
            PositionRange::new(5, 10)
        );
        assert!(range.intersect(&PositionRange::new(12, 20)).is_empty());
        assert_eq!(
            range.intersect(&PositionRange::new(0, 4)),
            PositionRange::new(2, 4)
        );
    }
}

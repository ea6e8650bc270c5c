use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}.")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Encoding failed: {0}.")]
    Encode(#[from] bincode::error::EncodeError),

    #[cfg(feature = "serde")]
    #[error("Decoding failed: {0}.")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("The configuration could not be read: {0}.")]
    Config(String),

    #[error("The gap penalty {value} is positive, but gap penalties must be zero or negative.")]
    PositiveGapPenalty { value: f64 },

    #[error("The gap penalty {value} is not a finite number.")]
    NonFiniteGapPenalty { value: f64 },

    #[error("The scorer returned a value that is not a finite number for row {row} and column {col}.")]
    ScoreNotANumber { row: usize, col: usize },

    #[error(
        "A substitution matrix of size {size} needs {expected} entries, but {actual} were given."
    )]
    SubstitutionMatrixSize {
        size: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "The scorer expects an alphabet of size {expected}, but the entities use sizes {row} and {col}."
    )]
    IncompatibleScorer {
        expected: usize,
        row: usize,
        col: usize,
    },

    #[error("The alphabet '{alphabet}' is invalid: {reason}.")]
    InvalidAlphabet { alphabet: String, reason: String },

    #[error("Position {position} cannot be used here.")]
    InvalidPosition { position: i128 },

    #[error("The profile statistics cannot be used: {reason}.")]
    InvalidProfileStatistics { reason: String },

    #[error("The profile has not been prepared. Call `prepare()` before aligning it.")]
    Unprepared,

    #[error("The multiple alignments are not compatible: {reason}.")]
    IncompatibleReference { reason: String },

    #[error("The alignments cannot be combined: {reason}.")]
    IncompatibleAlignments { reason: String },

    #[error("The alignment was aborted after visiting more than {limit} matrix cells.")]
    CellLimitExceeded { limit: u64 },
}

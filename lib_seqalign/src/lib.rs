pub mod alignandum;
pub mod alignator;
pub mod alignment;
pub mod error;
#[cfg(feature = "serde")]
mod io;
pub mod mult_alignment;
pub mod scoring;

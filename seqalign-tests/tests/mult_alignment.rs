use anyhow::Result;
use lib_seqalign::{
    alignandum::{Alignandum, Encoder},
    alignator::{AlignatorConfig, MultipleAlignator, PairwiseAlignator, ProgressiveAlignator},
    alignment::Alignment,
    mult_alignment::{GapAggregator, MultAlignment},
    scoring::SubstitutionMatrix,
};
use util::{init_logging, protein};

mod util;

const REFERENCE: &str = "0123456789";

fn diagonals(diagonals: &[(usize, usize, isize)]) -> Result<Alignment> {
    let mut alignment = Alignment::new();
    for &(from, to, offset) in diagonals {
        alignment.add_diagonal(from, to, offset)?;
    }
    Ok(alignment)
}

#[test]
fn expand_reproduces_reference_layout() -> Result<()> {
    init_logging();
    let mut mali = MultAlignment::new();
    mali.add(diagonals(&[(0, 3, 2), (3, 6, 4)])?);
    mali.add(diagonals(&[(0, 1, 1), (1, 6, 3)])?);
    mali.add(diagonals(&[(0, 1, 1), (1, 6, 3)])?);

    assert_eq!(mali.gap_counts(&[], GapAggregator::Sum)?, vec![0, 4, 0, 2, 0, 0, 0]);

    mali.expand(&[])?;
    assert_eq!(
        mali.to_gapped_strings(&[REFERENCE; 3])?,
        vec!["2----3456789", "123--45--678", "1--2345--678"]
    );
    assert!((0..mali.length()).all(|column| mali.is_aligned(column)));
    Ok(())
}

#[test]
fn progressive_alignment_of_identical_sequences() -> Result<()> {
    init_logging();
    let text = "ACDEFGHIK";
    let sequences = [protein(text), protein(text), protein(text)];
    let entities: Vec<&dyn Alignandum> = sequences
        .iter()
        .map(|sequence| sequence as &dyn Alignandum)
        .collect();
    let pairwise =
        PairwiseAlignator::new(AlignatorConfig::default(), SubstitutionMatrix::blosum62())?;
    let mut alignator = ProgressiveAlignator::new(pairwise, Encoder::protein());

    let mut mali: MultAlignment = MultAlignment::new();
    alignator.align(&mut mali, &entities)?;

    assert_eq!(mali.num_rows(), 3);
    assert_eq!(mali.length(), text.len());
    assert_eq!(mali.to_gapped_strings(&[text; 3])?, vec![text; 3]);
    Ok(())
}

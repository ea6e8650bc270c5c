use std::io::Cursor;

use anyhow::{Result, anyhow};
use lib_seqalign::{
    alignandum::{Alignandum, Encoder, Profile, Sequence},
    alignator::{Alignator, AlignatorConfig, PairwiseAlignator},
    alignment::{Alignment, SortedSparseStorage},
    scoring::SubstitutionMatrix,
};
use util::{init_logging, protein};

mod util;

#[test]
fn alignments_survive_a_round_trip() -> Result<()> {
    init_logging();
    let mut alignator =
        PairwiseAlignator::new(AlignatorConfig::default(), SubstitutionMatrix::blosum62())?;
    let mut first = Alignment::<SortedSparseStorage>::new();
    alignator.align(&mut first, &protein("HEAGAWGHEE"), &protein("PAWHEAE"))?;
    let mut second = Alignment::<SortedSparseStorage>::new();
    second.add_diagonal(3, 7, -2)?;

    let mut buffer = Vec::new();
    first.save(&mut buffer)?;
    second.save(&mut buffer)?;

    let mut reader = Cursor::new(buffer);
    let mut loaded = Vec::new();
    while let Some(alignment) = Alignment::<SortedSparseStorage>::load(&mut reader)? {
        loaded.push(alignment);
    }

    assert_eq!(loaded.len(), 2);
    for (loaded, original) in loaded.iter().zip([&first, &second]) {
        assert_eq!(loaded.score(), original.score());
        assert_eq!(loaded.bounds(), original.bounds());
        assert!(loaded.iter().eq(original.iter()));
    }
    Ok(())
}

#[test]
fn loaded_entities_align_like_the_originals() -> Result<()> {
    init_logging();
    let encoder = Encoder::protein();
    let sequence = Sequence::new("WWAAAAAWWWWAAAAAWW", &encoder);
    let mut profile =
        Profile::from_aligned_strings(&["AAAAAAACCCCAAAAAAA", "AAAAAAAC-CCAAAAAAA"], &encoder)?;
    profile.prepare();

    let mut buffer = Vec::new();
    sequence.save(&mut buffer)?;
    let mut reader = Cursor::new(buffer);
    let loaded_sequence = Sequence::load(&mut reader)?.ok_or(anyhow!("Missing sequence"))?;
    assert!(Sequence::load(&mut reader)?.is_none());

    let mut buffer = Vec::new();
    profile.save(&mut buffer)?;
    let mut reader = Cursor::new(buffer);
    let loaded_profile = Profile::load(&mut reader)?.ok_or(anyhow!("Missing profile"))?;
    assert!(loaded_profile.is_prepared());

    let mut alignator =
        PairwiseAlignator::new(AlignatorConfig::default(), SubstitutionMatrix::blosum62())?;
    let mut expected: Alignment = Alignment::new();
    alignator.align(&mut expected, &profile, &sequence)?;
    let mut result: Alignment = Alignment::new();
    alignator.align(&mut result, &loaded_profile, &loaded_sequence)?;

    assert_eq!(result.score(), expected.score());
    assert!(result.iter().eq(expected.iter()));
    Ok(())
}

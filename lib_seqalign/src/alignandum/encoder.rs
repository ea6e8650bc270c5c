use crate::error::{Error, Result};

/// The amino acid alphabet in the order of the BLOSUM matrices.
pub const PROTEIN_ALPHABET: &str = "ARNDCQEGHILKMFPSTWYVBZX";

pub const DNA_ALPHABET: &str = "ACGTN";

/// Translates between characters and residue codes.
///
/// Residue codes are indices into the alphabet. Characters are matched case-insensitively,
/// and characters outside of the alphabet encode as the mask code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encoder {
    alphabet: Vec<u8>,
    mask_code: u8,
}

impl Encoder {
    pub fn new(alphabet: &str, mask_char: char) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidAlphabet {
            alphabet: alphabet.to_string(),
            reason: reason.to_string(),
        };

        if alphabet.is_empty() {
            return Err(invalid("it is empty"));
        }
        if !alphabet.is_ascii() {
            return Err(invalid("it contains non-ASCII characters"));
        }
        if alphabet.len() > usize::from(u8::MAX) {
            return Err(invalid("it has more than 255 characters"));
        }

        let alphabet: Vec<u8> = alphabet.bytes().map(|c| c.to_ascii_uppercase()).collect();
        for (index, character) in alphabet.iter().enumerate() {
            if alphabet[..index].contains(character) {
                return Err(invalid("it contains duplicate characters"));
            }
        }

        let mask_code = mask_char
            .is_ascii()
            .then(|| mask_char.to_ascii_uppercase() as u8)
            .and_then(|mask| alphabet.iter().position(|&c| c == mask))
            .ok_or_else(|| invalid("it does not contain the mask character"))?;

        Ok(Self {
            alphabet,
            mask_code: mask_code as u8,
        })
    }

    /// The 20 amino acids plus `B`, `Z` and the mask character `X`.
    pub fn protein() -> Self {
        Self::from_valid(PROTEIN_ALPHABET, b'X')
    }

    /// The four nucleotides plus the mask character `N`.
    pub fn dna() -> Self {
        Self::from_valid(DNA_ALPHABET, b'N')
    }

    fn from_valid(alphabet: &str, mask: u8) -> Self {
        let alphabet = alphabet.as_bytes().to_vec();
        let mask_code = alphabet.iter().position(|&c| c == mask).unwrap_or(0) as u8;
        Self {
            alphabet,
            mask_code,
        }
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    pub fn mask_code(&self) -> u8 {
        self.mask_code
    }

    pub fn mask_char(&self) -> char {
        char::from(self.alphabet[usize::from(self.mask_code)])
    }

    pub fn encode_char(&self, character: char) -> u8 {
        if !character.is_ascii() {
            return self.mask_code;
        }
        let character = character.to_ascii_uppercase() as u8;
        self.alphabet
            .iter()
            .position(|&c| c == character)
            .map(|code| code as u8)
            .unwrap_or(self.mask_code)
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(|c| self.encode_char(c)).collect()
    }

    pub fn decode(&self, code: u8) -> char {
        char::from(
            self.alphabet
                .get(usize::from(code))
                .copied()
                .unwrap_or(self.alphabet[usize::from(self.mask_code)]),
        )
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::protein()
    }
}

use std::io::{BufRead, Write};

use crate::{
    error::Result,
    io::{load_record, save_record},
};

use super::{Profile, Sequence};

impl Sequence {
    pub fn save(&self, writer: impl Write) -> Result<()> {
        save_record(self, writer)
    }

    /// Reads the next sequence, or returns `None` if `reader` is exhausted.
    pub fn load(reader: &mut impl BufRead) -> Result<Option<Self>> {
        load_record(reader)
    }
}

impl Profile {
    /// Writes the counts and, if the profile is prepared, its frequencies.
    pub fn save(&self, writer: impl Write) -> Result<()> {
        save_record(self, writer)
    }

    /// Reads the next profile, or returns `None` if `reader` is exhausted.
    pub fn load(reader: &mut impl BufRead) -> Result<Option<Self>> {
        load_record(reader)
    }
}

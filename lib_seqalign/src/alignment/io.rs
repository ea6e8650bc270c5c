use std::io::{BufRead, Write};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::Result,
    io::{load_record, save_record},
};

use super::{Alignment, AlignmentStorage};

impl<Storage: AlignmentStorage + Serialize + DeserializeOwned> Alignment<Storage> {
    pub fn save(&self, writer: impl Write) -> Result<()> {
        save_record(self, writer)
    }

    /// Reads the next alignment, or returns `None` if `reader` is exhausted.
    pub fn load(reader: &mut impl BufRead) -> Result<Option<Self>> {
        load_record(reader)
    }
}

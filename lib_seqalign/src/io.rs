use std::io::{BufRead, Write};

use bincode::config;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

pub fn save_record<T: Serialize>(value: &T, mut writer: impl Write) -> Result<()> {
    bincode::serde::encode_into_std_write(value, &mut writer, config::standard())?;
    Ok(())
}

/// Decodes one record, or returns `None` if the reader is exhausted before the record starts.
pub fn load_record<T: DeserializeOwned>(reader: &mut impl BufRead) -> Result<Option<T>> {
    if reader.fill_buf()?.is_empty() {
        return Ok(None);
    }
    Ok(Some(bincode::serde::decode_from_std_read(
        reader,
        config::standard(),
    )?))
}

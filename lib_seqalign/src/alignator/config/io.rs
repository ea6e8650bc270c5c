use std::io::Read;

use log::trace;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

use super::{AlignatorConfig, IterativeConfig};

impl AlignatorConfig {
    /// Reads a TOML configuration. Missing keys take their default values.
    pub fn read_toml(reader: impl Read) -> Result<Self> {
        let result: Self = read_toml(reader)?;
        result.verify()?;
        trace!("Read alignator config {result:?}");
        Ok(result)
    }
}

impl IterativeConfig {
    pub fn read_toml(reader: impl Read) -> Result<Self> {
        read_toml(reader)
    }
}

fn read_toml<T: DeserializeOwned>(mut reader: impl Read) -> Result<T> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    toml::from_str(&input).map_err(|error| Error::Config(error.to_string()))
}

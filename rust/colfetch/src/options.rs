//! Extractor configuration.

use colfetch_common::{Result, error::Error, verify_arg};
use serde::{Deserialize, Serialize};

/// Capacity of the scratch chunk used when streaming variable-length values.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Options controlling an [`Extractor`](crate::extractor::Extractor).
///
/// The maximum field size is not part of the options: it is a session property
/// and is read from the buffer registry on every call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorOptions {
    /// Bytes requested from the driver per chunked fetch call.
    pub chunk_size: usize,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        ExtractorOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ExtractorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scratch chunk capacity.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Parses options from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ExtractorOptions = serde_json::from_str(json)
            .map_err(|e| Error::invalid_format("extractor options", e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let chunk_size = self.chunk_size;
        verify_arg!(chunk_size, chunk_size > 0);
        Ok(())
    }
}

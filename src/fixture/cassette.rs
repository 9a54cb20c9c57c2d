//! On-disk cassette format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::transport::{ApiRequest, ApiResponse};

/// Current cassette format version.
pub const CASSETTE_VERSION: u32 = 1;

/// One recorded request/response exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// The request as sent.
    pub request: ApiRequest,
    /// The response as received.
    pub response: ApiResponse,
}

/// An ordered list of recorded interactions.
///
/// ```json
/// { "version": 1,
///   "interactions": [
///     { "request":  { "method": "GET", "path": "/v4/regions" },
///       "response": { "status": 200, "body": { "data": [] } } } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cassette {
    /// Format version.
    pub version: u32,
    /// Recorded interactions in the order they happened.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

impl Default for Cassette {
    fn default() -> Self {
        Self {
            version: CASSETTE_VERSION,
            interactions: Vec::new(),
        }
    }
}

impl Cassette {
    /// Creates an empty cassette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interaction.
    pub fn push(&mut self, request: ApiRequest, response: ApiResponse) {
        self.interactions.push(Interaction { request, response });
    }

    /// Returns the number of interactions.
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Reads a cassette from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::fixture(format!("cannot read cassette {}: {}", path.display(), e)).with_source(e)
        })?;
        let cassette: Cassette = serde_json::from_str(&raw).map_err(|e| {
            Error::fixture(format!("malformed cassette {}: {}", path.display(), e)).with_source(e)
        })?;
        if cassette.version > CASSETTE_VERSION {
            return Err(Error::fixture(format!(
                "cassette {} has version {}, newest supported is {}",
                path.display(),
                cassette.version,
                CASSETTE_VERSION
            )));
        }
        Ok(cassette)
    }

    /// Writes the cassette to disk, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::fixture(format!("cannot encode cassette: {}", e)))?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}

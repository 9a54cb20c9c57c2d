//! Fixture configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::DEFAULT_API_URL;
use crate::Error;

/// Environment variable selecting [`FixtureMode`].
pub const ENV_FIXTURE_MODE: &str = "VPCKIT_FIXTURE_MODE";
/// Environment variable overriding the cassette directory.
pub const ENV_FIXTURES_DIR: &str = "VPCKIT_FIXTURES_DIR";
/// Environment variable overriding the API URL used when recording.
pub const ENV_API_URL: &str = "VPCKIT_API_URL";
/// Environment variable holding the API token used when recording.
pub const ENV_TOKEN: &str = "VPCKIT_TOKEN";

/// Whether fixtures are replayed or recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureMode {
    /// Serve responses from an existing cassette. No network access.
    #[default]
    Replay,
    /// Forward requests to the live API and write a fresh cassette.
    Record,
}

impl FixtureMode {
    /// Returns the mode name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureMode::Replay => "replay",
            FixtureMode::Record => "record",
        }
    }
}

impl FromStr for FixtureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "replay" | "playback" => Ok(FixtureMode::Replay),
            "record" | "recording" => Ok(FixtureMode::Record),
            other => Err(Error::configuration(format!(
                "unknown fixture mode '{}', expected 'replay' or 'record'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for FixtureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for binding clients to fixtures.
///
/// ## Default Values
///
/// - `mode`: [`FixtureMode::Replay`]
/// - `directory`: `tests/fixtures`
/// - `api_url`: `https://api.linode.com`
/// - `token`: none
/// - `timeout`: 30s
///
/// ## Example
///
/// ```rust
/// use vpckit::{FixtureConfig, FixtureMode};
///
/// let config = FixtureConfig::new()
///     .with_mode(FixtureMode::Replay)
///     .with_directory("tests/fixtures");
/// assert_eq!(
///     config.cassette_path("TestVPC_Create"),
///     std::path::Path::new("tests/fixtures/TestVPC_Create.json"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// Replay or record.
    pub mode: FixtureMode,
    /// Directory holding `<name>.json` cassettes.
    pub directory: PathBuf,
    /// API base URL, only contacted in record mode.
    pub api_url: String,
    /// API token, required in record mode.
    pub token: Option<String>,
    /// Request timeout for the live transport.
    pub timeout: Duration,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            mode: FixtureMode::default(),
            directory: PathBuf::from("tests/fixtures"),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl FixtureConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration from `VPCKIT_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(mode) = lookup(ENV_FIXTURE_MODE) {
            config.mode = mode.parse()?;
        }
        if let Some(dir) = lookup(ENV_FIXTURES_DIR).filter(|d| !d.is_empty()) {
            config.directory = PathBuf::from(dir);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.is_empty()) {
            config.api_url = url;
        }
        config.token = lookup(ENV_TOKEN).filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Sets the mode.
    #[must_use]
    pub fn with_mode(mut self, mode: FixtureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the cassette directory.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Sets the API URL used in record mode.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the API token used in record mode.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the live request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the cassette path for a fixture name.
    ///
    /// Names may carry a directory prefix (`fixtures/TestVPC_Create`); only
    /// the final component is used.
    pub fn cassette_path(&self, name: &str) -> PathBuf {
        let file = Path::new(name)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        self.directory.join(format!("{}.json", file))
    }
}

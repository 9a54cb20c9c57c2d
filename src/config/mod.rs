//! Configuration types.
//!
//! - [`FixtureConfig`]: where cassettes live and whether they are replayed
//!   or recorded against a live API
//! - [`FixtureMode`]: replay vs. record

mod fixture;

pub use fixture::{
    ENV_API_URL, ENV_FIXTURE_MODE, ENV_FIXTURES_DIR, ENV_TOKEN, FixtureConfig, FixtureMode,
};

/// Default API base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "https://api.linode.com";

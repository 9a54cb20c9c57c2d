//! Shared scenario helpers.

use chrono::NaiveDateTime;

use super::{TestReporter, Teardown};
use crate::config::FixtureConfig;
use crate::fixture::bind_client_to_fixture;
use crate::{Client, Error};

const UNIQUE_TEXT_LEN: usize = 10;

/// Returns a short random lowercase alphanumeric string for resource labels.
pub fn unique_text() -> String {
    std::iter::repeat_with(|| fastrand::alphanumeric().to_ascii_lowercase())
        .take(UNIQUE_TEXT_LEN)
        .collect()
}

/// Returns the ids of available regions that have every capability in `caps`.
///
/// A failed region listing is reported and yields an empty list; callers
/// decide whether running out of regions is fatal.
pub async fn regions_with_caps(
    reporter: &TestReporter,
    client: &Client,
    caps: &[&str],
) -> Vec<String> {
    match client.list_regions(None).await {
        Ok(regions) => regions
            .into_iter()
            .filter(|r| r.is_available() && r.has_capabilities(caps))
            .map(|r| r.id)
            .collect(),
        Err(e) => {
            reporter.error(format!("failed to list regions: {}", e));
            Vec::new()
        }
    }
}

/// Reports a failure unless the timestamp is set.
///
/// Returns whether the check passed.
pub fn assert_date_set(
    reporter: &TestReporter,
    field: &str,
    value: Option<&NaiveDateTime>,
) -> bool {
    match value {
        Some(date) if *date != NaiveDateTime::default() => true,
        _ => {
            reporter.error(format!("expected {} to be set, got {:?}", field, value));
            false
        }
    }
}

/// Binds a client to the named fixture using the environment configuration.
///
/// The returned teardown finalizes the fixture. A finalize failure is
/// reported, not raised.
pub fn create_test_client(reporter: &TestReporter, name: &str) -> Result<(Client, Teardown), Error> {
    let config = FixtureConfig::from_env()?;
    create_test_client_with(reporter, name, &config)
}

/// Like [`create_test_client`] with an explicit configuration.
pub fn create_test_client_with(
    reporter: &TestReporter,
    name: &str,
    config: &FixtureConfig,
) -> Result<(Client, Teardown), Error> {
    let (client, session) = bind_client_to_fixture(name, config)?;

    let mut teardown = Teardown::new();
    let reporter = reporter.clone();
    teardown.push(format!("finalize fixture {}", name), move || async move {
        if let Err(e) = session.finalize() {
            reporter.error(format!("failed to finalize fixture {}: {}", session.name(), e));
        }
    });
    Ok((client, teardown))
}

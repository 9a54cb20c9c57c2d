//! Fixture-bound clients.
//!
//! A fixture is a cassette of recorded request/response pairs. Binding a
//! client to a fixture yields the client and a [`FixtureSession`]; finalizing
//! the session closes the cassette (replay) or writes it to disk (record).
//!
//! ```rust,ignore
//! use vpckit::fixture::bind_client_to_fixture;
//! use vpckit::FixtureConfig;
//!
//! let config = FixtureConfig::from_env()?;
//! let (client, session) = bind_client_to_fixture("TestVPC_Create", &config)?;
//! let regions = client.list_regions(None).await?;
//! session.finalize()?;
//! ```

mod cassette;
mod recorder;
mod replay;

pub use cassette::{CASSETTE_VERSION, Cassette, Interaction};
pub use recorder::RecordingTransport;
pub use replay::ReplayTransport;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{FixtureConfig, FixtureMode};
use crate::{Client, Error};

enum SessionBackend {
    Replay(Arc<ReplayTransport>),
    Record {
        transport: Arc<RecordingTransport>,
        path: PathBuf,
    },
}

/// The finalization handle of a fixture-bound client.
///
/// [`finalize`](FixtureSession::finalize) is idempotent: the first
/// successful call closes or saves the cassette, later calls return `Ok(())`
/// and do nothing.
pub struct FixtureSession {
    name: String,
    path: PathBuf,
    backend: SessionBackend,
    finalized: Mutex<bool>,
}

impl FixtureSession {
    /// Returns the fixture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cassette path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the session replays or records.
    pub fn mode(&self) -> FixtureMode {
        match self.backend {
            SessionBackend::Replay(_) => FixtureMode::Replay,
            SessionBackend::Record { .. } => FixtureMode::Record,
        }
    }

    /// Returns `true` once the session has been finalized.
    pub fn is_finalized(&self) -> bool {
        *self.finalized.lock()
    }

    /// Finalizes the fixture.
    ///
    /// In replay mode the cassette is closed and unused interactions are
    /// logged. In record mode the cassette is written to [`path`](Self::path);
    /// if that fails the session stays unfinalized and can be finalized again.
    pub fn finalize(&self) -> Result<(), Error> {
        let mut finalized = self.finalized.lock();
        if *finalized {
            return Ok(());
        }

        match &self.backend {
            SessionBackend::Replay(replay) => {
                let unused = replay.close();
                if unused > 0 {
                    tracing::warn!(fixture = %self.name, unused, "fixture has unused interactions");
                } else {
                    tracing::debug!(fixture = %self.name, "fixture closed");
                }
            }
            SessionBackend::Record { transport, path } => {
                // Recording stops on the first attempt; a failed save keeps
                // the cassette so a later call can write it.
                transport.close();
                let cassette = transport.cassette();
                cassette.save(path)?;
                tracing::info!(
                    fixture = %self.name,
                    path = %path.display(),
                    interactions = cassette.len(),
                    "fixture recorded"
                );
            }
        }

        *finalized = true;
        Ok(())
    }
}

impl std::fmt::Debug for FixtureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureSession")
            .field("name", &self.name)
            .field("mode", &self.mode())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Binds a new client to the named fixture.
///
/// Replay mode loads `<directory>/<name>.json` and fails with a
/// [`Fixture`](crate::ErrorKind::Fixture) error if it is missing. Record
/// mode needs a token and the `rest` feature.
pub fn bind_client_to_fixture(
    name: &str,
    config: &FixtureConfig,
) -> Result<(Client, FixtureSession), Error> {
    let path = config.cassette_path(name);
    tracing::debug!(fixture = name, mode = %config.mode, path = %path.display(), "binding fixture");

    let (client, backend) = match config.mode {
        FixtureMode::Replay => {
            let replay = Arc::new(ReplayTransport::new(name, Cassette::load(&path)?));
            let client = Client::builder()
                .url(config.api_url.clone())
                .build_with_transport(replay.clone());
            (client, SessionBackend::Replay(replay))
        }
        FixtureMode::Record => {
            let recorder = Arc::new(RecordingTransport::new(name, live_transport(config)?));
            let client = Client::builder()
                .url(config.api_url.clone())
                .build_with_transport(recorder.clone());
            (
                client,
                SessionBackend::Record {
                    transport: recorder,
                    path: path.clone(),
                },
            )
        }
    };

    Ok((
        client,
        FixtureSession {
            name: name.to_string(),
            path,
            backend,
            finalized: Mutex::new(false),
        },
    ))
}

#[cfg(feature = "rest")]
fn live_transport(config: &FixtureConfig) -> Result<Arc<dyn crate::transport::Transport>, Error> {
    let token = config.token.as_ref().ok_or_else(|| {
        Error::configuration(format!(
            "recording fixtures needs an API token in {}",
            crate::config::ENV_TOKEN
        ))
    })?;
    let rest = crate::transport::RestTransport::builder()
        .base_url(&config.api_url)?
        .token(token.clone())
        .timeout(config.timeout)
        .build()?;
    Ok(Arc::new(rest))
}

#[cfg(not(feature = "rest"))]
fn live_transport(_config: &FixtureConfig) -> Result<Arc<dyn crate::transport::Transport>, Error> {
    Err(Error::configuration(
        "recording fixtures requires the 'rest' feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::transport::{ApiRequest, ApiResponse, TransportKind};

    fn write_cassette(dir: &Path, name: &str) {
        let mut cassette = Cassette::new();
        cassette.push(
            ApiRequest::get("/v4/regions"),
            ApiResponse::json(
                200,
                serde_json::json!({
                    "data": [{ "id": "us-east", "capabilities": ["VPCs"], "status": "ok" }],
                    "page": 1, "pages": 1, "results": 1
                }),
            ),
        );
        cassette.save(dir.join(format!("{}.json", name))).unwrap();
    }

    #[tokio::test]
    async fn test_bind_replay() {
        let dir = tempfile::tempdir().unwrap();
        write_cassette(dir.path(), "TestRegions");
        let config = FixtureConfig::new().with_directory(dir.path());

        let (client, session) = bind_client_to_fixture("fixtures/TestRegions", &config).unwrap();
        assert_eq!(client.transport_kind(), TransportKind::Replay);
        assert_eq!(session.mode(), FixtureMode::Replay);

        let regions = client.list_regions(None).await.unwrap();
        assert_eq!(regions[0].id, "us-east");

        session.finalize().unwrap();
        session.finalize().unwrap();
        assert!(session.is_finalized());

        let err = client.list_regions(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fixture);
    }

    #[test]
    fn test_bind_missing_cassette() {
        let dir = tempfile::tempdir().unwrap();
        let config = FixtureConfig::new().with_directory(dir.path());

        let err = bind_client_to_fixture("TestMissing", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fixture);
    }

    #[cfg(feature = "rest")]
    #[test]
    fn test_record_requires_token() {
        let config = FixtureConfig::new().with_mode(FixtureMode::Record);
        let err = bind_client_to_fixture("TestRecord", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[cfg(feature = "rest")]
    #[tokio::test]
    async fn test_record_writes_cassette_on_finalize() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/vpcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [], "page": 1, "pages": 1, "results": 0
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = FixtureConfig::new()
            .with_mode(FixtureMode::Record)
            .with_directory(dir.path())
            .with_api_url(server.uri())
            .with_token("secret");

        let (client, session) = bind_client_to_fixture("TestRecordList", &config).unwrap();
        assert!(client.list_vpcs(None).await.unwrap().is_empty());
        assert!(!session.path().exists());

        session.finalize().unwrap();
        let cassette = Cassette::load(session.path()).unwrap();
        assert_eq!(cassette.len(), 1);
        assert_eq!(cassette.interactions[0].request.path, "/v4/vpcs");

        let raw = std::fs::read_to_string(session.path()).unwrap();
        assert!(!raw.contains("secret"));
    }

    #[cfg(feature = "rest")]
    #[tokio::test]
    async fn test_record_finalize_retries_after_failed_save() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/regions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [], "page": 1, "pages": 1, "results": 0
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("cassettes");
        std::fs::write(&blocked, "not a directory").unwrap();
        let config = FixtureConfig::new()
            .with_mode(FixtureMode::Record)
            .with_directory(&blocked)
            .with_api_url(server.uri())
            .with_token("secret");

        let (client, session) = bind_client_to_fixture("TestRetrySave", &config).unwrap();
        client.list_regions(None).await.unwrap();

        assert!(session.finalize().is_err());
        assert!(!session.is_finalized());
        let err = client.list_regions(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fixture);

        std::fs::remove_file(&blocked).unwrap();
        session.finalize().unwrap();
        assert!(session.is_finalized());
        let cassette = Cassette::load(session.path()).unwrap();
        assert_eq!(cassette.len(), 1);
        assert_eq!(cassette.interactions[0].request.path, "/v4/regions");
    }
}

//! Recording transport.

use std::sync::Arc;

use parking_lot::Mutex;

use super::cassette::Cassette;
use crate::Error;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportKind};

/// Forwards requests to another transport and records each exchange.
///
/// Only method, path, query, filter and body are recorded; credentials live
/// in the inner transport's headers and never reach the cassette.
pub struct RecordingTransport {
    name: String,
    inner: Arc<dyn Transport>,
    state: Mutex<RecordingState>,
}

struct RecordingState {
    cassette: Cassette,
    closed: bool,
}

impl RecordingTransport {
    /// Wraps `inner`, recording into a fresh cassette.
    pub fn new(name: impl Into<String>, inner: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            inner,
            state: Mutex::new(RecordingState {
                cassette: Cassette::new(),
                closed: false,
            }),
        }
    }

    /// Returns the fixture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of exchanges recorded so far.
    pub fn recorded(&self) -> usize {
        self.state.lock().cassette.len()
    }

    /// Stops recording. Later requests fail; the cassette is kept.
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    /// Returns `true` once recording has stopped.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns a copy of the cassette recorded so far.
    pub fn cassette(&self) -> Cassette {
        self.state.lock().cassette.clone()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        if self.state.lock().closed {
            return Err(Error::fixture(format!(
                "fixture '{}' is already finalized, cannot record {}",
                self.name, request
            )));
        }

        let response = self.inner.send(request.clone()).await?;
        tracing::debug!(fixture = %self.name, request = %request, status = response.status, "recorded");

        let mut state = self.state.lock();
        if !state.closed {
            state.cassette.push(request, response.clone());
        }
        Ok(response)
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Recording
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::transport::MockTransport;

    #[tokio::test]
    async fn test_records_exchanges_in_order() {
        let recorder = RecordingTransport::new("rec", Arc::new(MockTransport::new()));

        recorder.send(ApiRequest::get("/v4/regions")).await.unwrap();
        recorder
            .send(ApiRequest::post(
                "/v4/vpcs",
                serde_json::json!({ "label": "a", "region": "us-east" }),
            ))
            .await
            .unwrap();
        assert_eq!(recorder.recorded(), 2);

        recorder.close();
        let cassette = recorder.cassette();
        assert_eq!(cassette.interactions[0].request.path, "/v4/regions");
        assert_eq!(cassette.interactions[1].response.status, 200);
        assert!(recorder.is_closed());
        assert_eq!(recorder.cassette(), cassette);
    }

    #[tokio::test]
    async fn test_rejects_after_close() {
        let recorder = RecordingTransport::new("rec", Arc::new(MockTransport::new()));
        recorder.close();

        let err = recorder.send(ApiRequest::get("/v4/vpcs")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fixture);
    }
}

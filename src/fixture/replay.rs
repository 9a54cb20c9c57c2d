//! Cassette playback.

use parking_lot::Mutex;

use super::cassette::{Cassette, Interaction};
use crate::Error;
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportKind};

/// Serves responses from a recorded cassette.
///
/// Each request consumes the first unused interaction with the same method,
/// path, query and filter. Repeated identical requests therefore replay in
/// recorded order. Once [`close`](ReplayTransport::close)d, every request
/// fails.
pub struct ReplayTransport {
    name: String,
    state: Mutex<ReplayState>,
}

struct ReplayState {
    interactions: Vec<Interaction>,
    used: Vec<bool>,
    closed: bool,
}

impl ReplayTransport {
    /// Creates a replay transport for the named fixture.
    pub fn new(name: impl Into<String>, cassette: Cassette) -> Self {
        let used = vec![false; cassette.interactions.len()];
        Self {
            name: name.into(),
            state: Mutex::new(ReplayState {
                interactions: cassette.interactions,
                used,
                closed: false,
            }),
        }
    }

    /// Returns the fixture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of interactions not yet replayed.
    pub fn remaining(&self) -> usize {
        self.state.lock().used.iter().filter(|u| !**u).count()
    }

    /// Returns `true` once the transport has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Stops serving requests and returns the unused interaction count.
    ///
    /// Closing twice is harmless.
    pub fn close(&self) -> usize {
        let mut state = self.state.lock();
        state.closed = true;
        state.used.iter().filter(|u| !**u).count()
    }
}

#[async_trait::async_trait]
impl Transport for ReplayTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(Error::fixture(format!(
                "fixture '{}' is already finalized, cannot replay {}",
                self.name, request
            )));
        }

        let ReplayState {
            interactions, used, ..
        } = &mut *state;
        let index = interactions
            .iter()
            .zip(used.iter())
            .position(|(interaction, used)| !*used && interaction.request.matches(&request));

        match index {
            Some(i) => {
                used[i] = true;
                tracing::debug!(fixture = %self.name, index = i, request = %request, "replayed");
                Ok(interactions[i].response.clone())
            }
            None => {
                tracing::warn!(fixture = %self.name, request = %request, "no recorded interaction");
                Err(Error::fixture(format!(
                    "no recorded interaction for {} in fixture '{}'",
                    request, self.name
                )))
            }
        }
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Replay
    }
}

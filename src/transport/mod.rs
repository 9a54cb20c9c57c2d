//! Transport layer for control-plane communication.
//!
//! - [`RestTransport`] (feature `rest`): one HTTP exchange per request
//! - [`MockTransport`]: in-memory control plane for unit tests
//! - Replay and recording transports live in [`crate::fixture`]
//!
//! Users normally interact with the higher-level [`Client`](crate::Client);
//! the [`Transport`] trait is the seam for plugging in a backend.

pub(crate) mod mock;
pub(crate) mod traits;

#[cfg(feature = "rest")]
pub(crate) mod rest;

pub use mock::MockTransport;
pub use traits::{ApiRequest, ApiResponse, Method, Transport, TransportKind};

#[cfg(feature = "rest")]
pub use rest::{RestTransport, RestTransportBuilder};

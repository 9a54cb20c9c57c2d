//! The control-plane client.
//!
//! [`Client`] exposes the VPC lifecycle (create, get, update, list, delete)
//! and the region listing the harness needs for capability lookup. All calls
//! go through a [`Transport`](crate::transport::Transport), so the same
//! client drives a live API, a replayed fixture, or the in-memory mock.
//!
//! ```rust,ignore
//! use vpckit::prelude::*;
//!
//! let client = Client::builder()
//!     .url("https://api.linode.com")
//!     .token(token)
//!     .build()?;
//!
//! let vpc = client
//!     .create_vpc(VpcCreateOptions::new("my-vpc", "us-east").with_subnet("a", "10.0.0.0/24"))
//!     .await?;
//! client.delete_vpc(vpc.id).await?;
//! ```

mod builder;
mod inner;
mod region;
mod vpc;

pub use builder::{ClientBuilder, HasUrl, NoUrl};

use std::sync::Arc;

use crate::transport::TransportKind;

/// The control-plane client.
///
/// `Client` is `Clone` and thread-safe; clones share one transport. The
/// harness hands clones to teardown steps so a deletion can outlive the
/// borrow of the scenario that created the resource.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Returns the base URL of the client.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Returns which transport backs this client.
    pub fn transport_kind(&self) -> TransportKind {
        self.inner.transport.kind()
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url)
            .field("transport", &self.inner.transport.kind())
            .finish_non_exhaustive()
    }
}

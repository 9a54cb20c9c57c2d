//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use super::inner::ClientInner;
#[cfg(feature = "rest")]
use crate::transport::RestTransport;
use crate::{Client, Error, config::DEFAULT_API_URL, transport::Transport};

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// A live client needs a URL, enforced at compile time. A client over an
/// explicit transport (replay, recording, mock) can be built in any state
/// with [`build_with_transport`](ClientBuilder::build_with_transport).
///
/// ## Example
///
/// ```rust,ignore
/// use vpckit::Client;
///
/// let client = Client::builder()
///     .url("https://api.linode.com")
///     .token(std::env::var("VPCKIT_TOKEN")?)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            token: None,
            user_agent: None,
            timeout: None,
            _url_state: PhantomData,
        }
    }

    /// Sets the API base URL (e.g., `https://api.linode.com`).
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            token: self.token,
            user_agent: self.user_agent,
            timeout: self.timeout,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the bearer token sent with every request.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a client over the given transport.
    ///
    /// Token, timeout and user agent are properties of the REST transport
    /// and are ignored here.
    pub fn build_with_transport(self, transport: Arc<dyn Transport>) -> Client {
        Client::from_inner(ClientInner {
            url: self.url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            transport,
        })
    }
}

impl ClientBuilder<HasUrl> {
    /// Builds a client talking to the configured URL over REST.
    #[cfg(feature = "rest")]
    pub fn build(self) -> Result<Client, Error> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| Error::configuration("URL is required"))?;

        let mut rest = RestTransport::builder().base_url(&url)?;
        if let Some(token) = &self.token {
            rest = rest.token(token.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            rest = rest.user_agent(user_agent.clone());
        }
        if let Some(timeout) = self.timeout {
            rest = rest.timeout(timeout);
        }

        Ok(self.build_with_transport(Arc::new(rest.build()?)))
    }

    /// Builds a client talking to the configured URL over REST.
    #[cfg(not(feature = "rest"))]
    pub fn build(self) -> Result<Client, Error> {
        Err(Error::configuration(
            "REST transport requested but 'rest' feature is not enabled",
        ))
    }
}

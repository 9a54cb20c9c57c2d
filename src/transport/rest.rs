//! REST transport implementation using reqwest.
//!
//! Used when recording fixtures against a live API. It performs exactly one
//! HTTP exchange per request: no retries, no paging.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::Error;
use crate::error::ErrorKind;
use crate::transport::traits::{ApiRequest, ApiResponse, Method, Transport, TransportKind};

const DEFAULT_USER_AGENT: &str = concat!("vpckit/", env!("CARGO_PKG_VERSION"));

/// REST transport using reqwest.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
}

impl std::fmt::Debug for RestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestTransport {
    /// Creates a new REST transport builder.
    pub fn builder() -> RestTransportBuilder {
        RestTransportBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, Error> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| Error::configuration(format!("Invalid URL path: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn map_send_error(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() {
        ErrorKind::Connection
    } else {
        ErrorKind::Transport
    };
    Error::new(kind, format!("Request failed: {}", err)).with_source(err)
}

#[async_trait::async_trait]
impl Transport for RestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .headers(self.headers.clone());
        if let Some(filter) = &request.filter {
            builder = builder.header("X-Filter", filter.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let bytes = response.bytes().await.map_err(map_send_error)?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(&bytes).map_err(|e| {
                Error::invalid_response(format!("Failed to parse response body: {}", e))
            })?)
        };

        tracing::debug!(status, "received response");
        Ok(ApiResponse {
            status,
            body,
            request_id,
        })
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Rest
    }
}

/// Builder for [`RestTransport`].
pub struct RestTransportBuilder {
    base_url: Option<Url>,
    token: Option<String>,
    user_agent: String,
    timeout: Duration,
}

impl RestTransportBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self, Error> {
        let mut parsed = Url::parse(url.as_ref())
            .map_err(|e| Error::configuration(format!("Invalid base URL: {}", e)))?;
        // Url::join drops the last segment unless the path ends with a slash.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the transport.
    pub fn build(self) -> Result<RestTransport, Error> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("Base URL is required"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::new(ErrorKind::Unauthorized, "Invalid auth token format"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(RestTransport {
            client,
            base_url,
            headers,
        })
    }
}

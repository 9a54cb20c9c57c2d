//! Transport trait definitions and common types.
//!
//! A transport moves one [`ApiRequest`] to the control plane and brings back
//! one [`ApiResponse`]. The [`Client`](crate::Client) does all JSON mapping
//! and status handling on top of it, so the same client code runs against a
//! live API, a replayed cassette, or the in-memory mock.

use serde::{Deserialize, Serialize};

use crate::Error;

// ============================================================================
// Transport Kind
// ============================================================================

/// Available transport implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// REST over HTTP against a live API.
    Rest,
    /// Replays a recorded cassette.
    Replay,
    /// Forwards to another transport and records every exchange.
    Recording,
    /// In-memory control plane for unit tests.
    Mock,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Rest => write!(f, "rest"),
            TransportKind::Replay => write!(f, "replay"),
            TransportKind::Recording => write!(f, "recording"),
            TransportKind::Mock => write!(f, "mock"),
        }
    }
}

// ============================================================================
// Requests and Responses
// ============================================================================

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API request.
///
/// Requests are also the matching key of recorded fixtures, which is why
/// they serialize: method, path and query identify an interaction, while the
/// body is kept for reference only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base URL (e.g., `/v4/vpcs/42`).
    pub path: String,
    /// Query parameters in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
    /// Serialized `X-Filter` header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// JSON request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request without query, filter or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            filter: None,
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Creates a PUT request with a JSON body.
    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the `X-Filter` header value.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns `true` if `other` addresses the same endpoint.
    ///
    /// Bodies are ignored: generated labels differ between the recording run
    /// and every replay.
    pub fn matches(&self, other: &ApiRequest) -> bool {
        self.method == other.method
            && self.path == other.path
            && self.query == other.query
            && self.filter == other.filter
    }

    /// Returns the path with its encoded query string.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

/// A single API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body, if the response had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Server-assigned request ID, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiResponse {
    /// Creates a response with a JSON body.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: Some(body),
            request_id: None,
        }
    }

    /// Creates a response without a body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: None,
            request_id: None,
        }
    }

    /// Creates an API error response with the standard `errors` envelope.
    pub fn error(status: u16, reason: impl Into<String>) -> Self {
        Self::json(
            status,
            serde_json::json!({ "errors": [{ "reason": reason.into() }] }),
        )
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Moves API requests to a backend.
///
/// Implementations must be shareable across tasks; the client holds one
/// behind an `Arc`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors. An `Err`
    /// means no response was obtained at all.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error>;

    /// Returns which implementation this is.
    fn kind(&self) -> TransportKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_serde() {
        assert_eq!(serde_json::to_value(Method::Delete).unwrap(), "DELETE");
        let m: Method = serde_json::from_value(serde_json::json!("PUT")).unwrap();
        assert_eq!(m, Method::Put);
    }

    #[test]
    fn test_request_matches_ignores_body() {
        let a = ApiRequest::post("/v4/vpcs", serde_json::json!({ "label": "one" }));
        let b = ApiRequest::post("/v4/vpcs", serde_json::json!({ "label": "two" }));
        assert!(a.matches(&b));

        let c = ApiRequest::get("/v4/vpcs");
        assert!(!a.matches(&c));

        let d = ApiRequest::get("/v4/vpcs").with_query("page", "2");
        assert!(!c.matches(&d));
    }

    #[test]
    fn test_path_and_query() {
        let req = ApiRequest::get("/v4/vpcs")
            .with_query("page", "2")
            .with_query("q", "a b");
        assert_eq!(req.path_and_query(), "/v4/vpcs?page=2&q=a%20b");
        assert_eq!(req.to_string(), "GET /v4/vpcs?page=2&q=a%20b");
    }

    #[test]
    fn test_response_helpers() {
        assert!(ApiResponse::empty(204).is_success());
        assert!(!ApiResponse::error(404, "Not found").is_success());
        assert_eq!(
            ApiResponse::error(400, "bad").body.unwrap()["errors"][0]["reason"],
            "bad"
        );
    }

    #[test]
    fn test_transport_kind_display() {
        assert_eq!(TransportKind::Replay.to_string(), "replay");
        assert_eq!(TransportKind::Rest.to_string(), "rest");
    }
}

//! Internal client implementation.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, ErrorKind};
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub(crate) struct ClientInner {
    /// The API base URL.
    pub url: String,

    /// Backend the requests are sent through.
    pub transport: Arc<dyn Transport>,
}

impl ClientInner {
    /// Sends a request and decodes a successful JSON body.
    pub(crate) async fn execute<R>(&self, request: ApiRequest) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request).await?;
        let body = response.body.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(body)
            .map_err(|e| Error::invalid_response(format!("Failed to parse response: {}", e)))
    }

    /// Sends a request whose successful response carries no meaningful body.
    pub(crate) async fn execute_empty(&self, request: ApiRequest) -> Result<(), Error> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let described = request.to_string();
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            tracing::debug!(request = %described, status = response.status, "API error");
            Err(map_status_error(&response))
        }
    }
}

/// Serializes a request payload.
pub(crate) fn to_body<T: Serialize>(payload: &T) -> Result<serde_json::Value, Error> {
    serde_json::to_value(payload)
        .map_err(|e| Error::invalid_argument(format!("Failed to serialize request: {}", e)))
}

/// Maps an error response to an [`Error`].
///
/// The API reports failures as `{"errors": [{"reason": "...", "field": "..."}]}`;
/// all reasons are joined into the message.
pub(crate) fn map_status_error(response: &ApiResponse) -> Error {
    let kind = ErrorKind::from_http_status(response.status);
    let reasons = response
        .body
        .as_ref()
        .and_then(|b| b.get("errors"))
        .and_then(|e| e.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    let reason = e.get("reason")?.as_str()?;
                    Some(match e.get("field").and_then(|f| f.as_str()) {
                        Some(field) => format!("[{}] {}", field, reason),
                        None => reason.to_string(),
                    })
                })
                .collect::<Vec<_>>()
                .join("; ")
        })
        .filter(|joined| !joined.is_empty());

    let message = match reasons {
        Some(reasons) => format!("[{}] {}", response.status, reasons),
        None => format!("[{}] {}", response.status, kind),
    };
    let err = Error::new(kind, message);
    match &response.request_id {
        Some(id) => err.with_request_id(id.clone()),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_error_joins_reasons() {
        let response = ApiResponse::json(
            400,
            serde_json::json!({
                "errors": [
                    { "reason": "Label must be unique", "field": "label" },
                    { "reason": "Region does not support VPCs" }
                ]
            }),
        );
        let err = map_status_error(&response);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            err.message(),
            "[400] [label] Label must be unique; Region does not support VPCs"
        );
    }

    #[test]
    fn test_map_status_error_without_body() {
        let mut response = ApiResponse::empty(503);
        response.request_id = Some("req_9".into());
        let err = map_status_error(&response);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.message(), "[503] internal error");
        assert_eq!(err.request_id(), Some("req_9"));
    }
}

//! Upstream call descriptors and error definitions.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// A single outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    /// HTTP verb to use upstream.
    pub method: Method,
    /// Resource identifier. `None` targets the collection.
    pub id: Option<String>,
    /// JSON payload for create/update.
    pub body: Option<Value>,
    /// Correlation id forwarded as `x-request-id`.
    pub request_id: Option<String>,
}

impl UpstreamCall {
    /// Call against the collection (`/posts`).
    pub fn collection(method: Method) -> Self {
        Self {
            method,
            id: None,
            body: None,
            request_id: None,
        }
    }

    /// Call against a single entity (`/posts/{id}`).
    pub fn entity(method: Method, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::collection(method)
        }
    }

    /// Attach a JSON payload.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach the correlation id, if the inbound request carried one.
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Status and decoded body of an upstream reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    /// Status as returned by the upstream.
    pub status: StatusCode,
    /// Decoded body; non-JSON error bodies are kept as a string.
    pub body: Value,
}

impl UpstreamResponse {
    /// Turn a non-2xx reply into [`UpstreamError::Status`].
    pub fn ensure_success(self) -> UpstreamResult<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(UpstreamError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Errors that can occur while talking to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS or body read failure.
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream responded with {status}")]
    Status { status: StatusCode, body: Value },

    /// Upstream body was not JSON.
    #[error("Upstream returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_fill_call() {
        let call = UpstreamCall::entity(Method::PUT, "7")
            .with_body(json!({"title": "t"}))
            .with_request_id(Some("abc".into()));
        assert_eq!(call.method, Method::PUT);
        assert_eq!(call.id.as_deref(), Some("7"));
        assert_eq!(call.body, Some(json!({"title": "t"})));
        assert_eq!(call.request_id.as_deref(), Some("abc"));

        let call = UpstreamCall::collection(Method::GET);
        assert!(call.id.is_none() && call.body.is_none());
    }

    #[test]
    fn ensure_success_passes_2xx() {
        let resp = UpstreamResponse {
            status: StatusCode::CREATED,
            body: json!({"id": 101}),
        };
        assert_eq!(resp.clone().ensure_success().unwrap(), resp);
    }

    #[test]
    fn ensure_success_rejects_non_2xx() {
        let resp = UpstreamResponse {
            status: StatusCode::NOT_FOUND,
            body: json!({}),
        };
        let err = resp.ensure_success().unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "Upstream responded with 404 Not Found");
    }
}

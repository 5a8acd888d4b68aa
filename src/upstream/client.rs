//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Build the outbound URL from the configured base and the resource id
//! - Send the JSON body with `Content-Type: application/json`
//! - Decode the JSON reply without inspecting it

use reqwest::header::HeaderValue;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::upstream::types::{UpstreamCall, UpstreamResponse, UpstreamResult};

/// Resource path on the upstream host.
pub const RESOURCE_PATH: &str = "/posts";

/// Thin wrapper over a pooled `reqwest::Client` bound to one upstream host.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client for `base_url` (e.g. `https://jsonplaceholder.typicode.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Outbound URL for a call. The id is substituted literally.
    pub fn url_for(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, RESOURCE_PATH, id),
            None => format!("{}{}", self.base_url, RESOURCE_PATH),
        }
    }

    /// Perform exactly one upstream call.
    pub async fn send(&self, call: UpstreamCall) -> UpstreamResult<UpstreamResponse> {
        let url = self.url_for(call.id.as_deref());

        tracing::debug!(
            method = %call.method,
            url = %url,
            has_body = call.body.is_some(),
            "Calling upstream"
        );

        let mut request = self.http.request(call.method.clone(), &url);
        if let Some(body) = &call.body {
            // `json` sets Content-Type: application/json
            request = request.json(body);
        }
        if let Some(request_id) = call.request_id.as_deref() {
            if let Ok(value) = HeaderValue::from_str(request_id) {
                request = request.header("x-request-id", value);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = decode_body(status, &bytes)?;

        tracing::debug!(method = %call.method, url = %url, status = %status, "Upstream replied");

        Ok(UpstreamResponse { status, body })
    }
}

/// Decode an upstream body.
///
/// Empty bodies become `null`. Error replies are often plain text or HTML, so
/// a non-2xx body that is not JSON is kept as a string and the status wins.
fn decode_body(status: StatusCode, bytes: &[u8]) -> UpstreamResult<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        Err(e) => Err(e.into()),
    }
}

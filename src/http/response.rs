//! Response envelope and error mapping.
//!
//! # Responsibilities
//! - Wrap upstream bodies in the `{status, data|message}` envelope
//! - Map upstream and request failures to a `Failed` envelope
//! - Pick the HTTP status code for each failure
//!
//! # Design Decisions
//! - `data` is opaque: never inspected or reshaped
//! - Upstream non-2xx statuses are relayed as-is
//! - Transport and decode failures become 502 Bad Gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// `status` value of every success envelope.
pub const STATUS_SUCCESSFUL: &str = "Successful";
/// `status` value of every failure envelope.
pub const STATUS_FAILED: &str = "Failed";
/// Fixed message returned by delete.
pub const DELETED_MESSAGE: &str = "Data deleted!";

/// Body returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{"status": "Successful", "data": ...}`
    Data(Value),
    /// `{"status": "Successful", "message": ...}`
    Message(String),
    /// `{"status": "Failed", "message": ...}`
    Failed(String),
}

impl Envelope {
    /// Success envelope returned by delete.
    pub fn deleted() -> Self {
        Envelope::Message(DELETED_MESSAGE.to_string())
    }

    /// Value of the `status` field.
    pub fn status(&self) -> &'static str {
        match self {
            Envelope::Data(_) | Envelope::Message(_) => STATUS_SUCCESSFUL,
            Envelope::Failed(_) => STATUS_FAILED,
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 2)?;
        state.serialize_field("status", self.status())?;
        match self {
            Envelope::Data(data) => state.serialize_field("data", data)?,
            Envelope::Message(message) | Envelope::Failed(message) => {
                state.serialize_field("message", message)?
            }
        }
        state.end()
    }
}

/// Renders as `200 OK`. Failures pick their own status through [`ApiError`].
impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Failures surfaced by the post handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The inbound body could not be read or parsed.
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl ApiError {
    /// A 400 for a body that is not valid JSON.
    pub fn invalid_body(message: impl Into<String>) -> Self {
        ApiError::InvalidBody {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// HTTP status code sent to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upstream(UpstreamError::Status { status, .. }) => *status,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Envelope::Failed(self.to_string())).into_response()
    }
}

//! The five post handlers.
//!
//! Each handler is a one-to-one translation of the inbound request into a
//! single upstream call. Missing identifiers are forwarded as an empty path
//! segment and bodies are never validated.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
};
use serde_json::Value;

use crate::http::request::{request_id, PostPayload};
use crate::http::response::{ApiError, Envelope};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{UpstreamCall, UpstreamResponse};

/// `GET {prefix}`: list every post.
pub async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Envelope, ApiError> {
    let call = UpstreamCall::collection(Method::GET).with_request_id(request_id(&headers));
    forward(&state, "list", call).await.map(Envelope::Data)
}

/// `POST {prefix}`: create a post from the inbound body.
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    PostPayload(body): PostPayload,
) -> Result<Envelope, ApiError> {
    let call = UpstreamCall::collection(Method::POST)
        .with_body(body)
        .with_request_id(request_id(&headers));
    forward(&state, "create", call).await.map(Envelope::Data)
}

/// `GET {prefix}/{id}`: fetch one post.
pub async fn read_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Envelope, ApiError> {
    let call = UpstreamCall::entity(Method::GET, id).with_request_id(request_id(&headers));
    forward(&state, "read", call).await.map(Envelope::Data)
}

/// `PUT {prefix}/{id}`: replace one post with the inbound body.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: PostPayload,
) -> Result<Envelope, ApiError> {
    update(&state, id, &headers, payload).await
}

/// `PUT {prefix}/`: update with the identifier absent.
pub async fn update_post_without_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: PostPayload,
) -> Result<Envelope, ApiError> {
    update(&state, String::new(), &headers, payload).await
}

/// `DELETE {prefix}/{id}`: delete one post.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Envelope, ApiError> {
    delete(&state, id, &headers).await
}

/// `DELETE {prefix}/`: delete with the identifier absent.
pub async fn delete_post_without_id(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Envelope, ApiError> {
    delete(&state, String::new(), &headers).await
}

async fn update(
    state: &AppState,
    id: String,
    headers: &HeaderMap,
    PostPayload(body): PostPayload,
) -> Result<Envelope, ApiError> {
    let call = UpstreamCall::entity(Method::PUT, id)
        .with_body(body)
        .with_request_id(request_id(headers));
    forward(state, "update", call).await.map(Envelope::Data)
}

async fn delete(state: &AppState, id: String, headers: &HeaderMap) -> Result<Envelope, ApiError> {
    let call = UpstreamCall::entity(Method::DELETE, id).with_request_id(request_id(headers));
    // Upstream body is discarded; only success matters.
    forward(state, "delete", call).await?;
    Ok(Envelope::deleted())
}

/// Make the upstream call, record it, and unwrap a successful body.
async fn forward(state: &AppState, operation: &'static str, call: UpstreamCall) -> Result<Value, ApiError> {
    let start = Instant::now();
    let method = call.method.clone();
    let request_id = call.request_id.clone().unwrap_or_else(|| "unknown".to_string());
    let id = call.id.clone();

    let result = state
        .upstream
        .send(call)
        .await
        .and_then(UpstreamResponse::ensure_success);

    match result {
        Ok(response) => {
            metrics::record_request(operation, method.as_str(), StatusCode::OK.as_u16(), start);
            tracing::info!(
                request_id = %request_id,
                operation,
                id = ?id,
                upstream_status = %response.status,
                "Request forwarded"
            );
            Ok(response.body)
        }
        Err(e) => {
            let err = ApiError::from(e);
            let status = err.status_code();
            metrics::record_request(operation, method.as_str(), status.as_u16(), start);
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, operation, id = ?id, error = %err, "Upstream call failed");
            } else {
                tracing::warn!(request_id = %request_id, operation, id = ?id, error = %err, "Upstream rejected request");
            }
            Err(err)
        }
    }
}

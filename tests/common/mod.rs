//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use posts_proxy::config::ProxyConfig;

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("recorded body is JSON")
    }
}

type Responder = Arc<dyn Fn(&Method, &str) -> (u16, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Responder,
}

/// A programmable upstream bound to an ephemeral port.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("upstream received no request")
    }

    /// Proxy config pointing at this upstream.
    pub fn config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.upstream.base_url = self.url();
        config
    }
}

/// Start a mock upstream answering with `responder(method, path)`.
pub async fn start_upstream<F>(responder: F) -> MockUpstream
where
    F: Fn(&Method, &str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = MockState {
        requests: requests.clone(),
        responder: Arc::new(responder),
    };
    let app = Router::new().fallback(record).with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, requests }
}

/// Start a mock upstream behaving like jsonplaceholder.
pub async fn start_placeholder_upstream() -> MockUpstream {
    start_upstream(placeholder).await
}

async fn record(State(mock): State<MockState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let path = parts.uri.path().to_string();
    let header_str = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    mock.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: path.clone(),
        content_type: header_str("content-type"),
        request_id: header_str("x-request-id"),
        body: body.to_vec(),
    });

    let (status, body) = (mock.responder)(&parts.method, &path);
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        Body::from(body),
    )
        .into_response()
}

pub fn sample_post(id: u64) -> Value {
    json!({"userId": 1, "id": id, "title": "t", "body": "b"})
}

fn placeholder(method: &Method, path: &str) -> (u16, String) {
    let id = path.strip_prefix("/posts/");
    match (method.as_str(), id) {
        ("GET", None) if path == "/posts" => {
            (200, json!([sample_post(1), sample_post(2)]).to_string())
        }
        ("POST", None) if path == "/posts" => (201, json!({"id": 101}).to_string()),
        ("GET", Some("1")) => (200, sample_post(1).to_string()),
        ("GET", Some(_)) => (404, "{}".into()),
        ("PUT", Some(id)) => (200, json!({"id": id, "updated": true}).to_string()),
        ("DELETE", Some(_)) => (200, json!({"upstream": "says something else"}).to_string()),
        _ => (404, "{}".into()),
    }
}

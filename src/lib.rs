//! Blog posts passthrough proxy.
//!
//! Re-exposes an upstream `/posts` REST resource under a local prefix. Every
//! inbound request becomes exactly one upstream call, and the reply is wrapped
//! in a `{status, data|message}` envelope.
//!
//! ```text
//!     Client ──▶ http::server ──▶ posts::routes ──▶ posts::handlers
//!                                                        │
//!                                                        ▼
//!     Client ◀── http::response (Envelope) ◀──── upstream::client ◀──▶ Upstream
//! ```

pub mod config;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod posts;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::{AppState, Envelope, HttpServer};
pub use lifecycle::Shutdown;
pub use upstream::UpstreamClient;

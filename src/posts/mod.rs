//! Blog post passthrough routes.
//!
//! # Data Flow
//! ```text
//! axum Router (routes.rs, mounted under the configured prefix)
//!     → handlers.rs (build UpstreamCall from method, id, body)
//!     → upstream::UpstreamClient (single call)
//!     → http::response::Envelope (wrap upstream body)
//! ```

pub mod handlers;
pub mod routes;

pub use routes::posts_router;

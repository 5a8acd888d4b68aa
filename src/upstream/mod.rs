//! Upstream REST client subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler
//!     → types.rs (UpstreamCall: method, optional id, optional JSON body)
//!     → client.rs (one reqwest call against base_url + /posts[/{id}])
//!     → types.rs (UpstreamResponse: status + decoded JSON body)
//! ```
//!
//! # Constraints
//! - Exactly one attempt per call: no retry, no backoff, no circuit breaker
//! - No local timeout; the reqwest defaults apply
//! - Bodies are forwarded as-is, never inspected

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{UpstreamCall, UpstreamError, UpstreamResponse, UpstreamResult};

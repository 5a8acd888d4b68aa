//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID, payload parsing)
//!     → posts handlers (one upstream call each)
//!     → response.rs (envelope, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{PostPayload, X_REQUEST_ID};
pub use response::{ApiError, Envelope};
pub use server::{build_router, AppState, HttpServer, ServerError};

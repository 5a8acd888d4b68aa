//! API documentation metadata.
//!
//! Produces a static OpenAPI 3 description of the post routes. Rendering it
//! (Swagger UI or similar) is left to external tooling that fetches
//! `{docs_path}/openapi.json`.

pub mod openapi;

pub use openapi::{document, openapi_json};

//! HTTP API surface
//!
//! A thin axum layer over [`crate::rag::RagService`]: request validation
//! (empty query, unknown persona) happens here at the boundary, before
//! any billed external call is made.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::serve_api;

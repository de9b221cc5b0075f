//! fangate-backend
//!
//! Thin client for the vector-search backend's HTTP API: the GraphQL query
//! endpoint and the schema listing. One pooled [`reqwest::Client`] is built
//! at startup and shared by every concurrent fan-out task; the client has
//! no per-request state.

pub mod client;
pub mod error;

pub use client::{BackendClient, SchemaInfo};
pub use error::BackendError;

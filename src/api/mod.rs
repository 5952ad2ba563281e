//! HTTP layer: protocol endpoints, DTOs and middleware.
//!
//! This layer translates HTTP and XML-RPC requests into application
//! operations and renders the wire formats the linkback protocols expect.
//!
//! # Modules
//!
//! - [`dto`] - request/response payloads and XML renderings
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - request tracing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;

//! HTTP surface of TokenGate: routes, bearer middleware and error mapping.
//!
//! Exposed as a library so the HTTP tests can build the same application
//! `main` serves.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

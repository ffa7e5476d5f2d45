//! HTTP route handlers grouped by feature

pub mod auth;

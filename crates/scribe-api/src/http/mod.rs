//! HTTP layer.

pub mod handlers;
pub mod routes;

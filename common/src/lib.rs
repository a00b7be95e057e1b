//! Pieces shared by the umbrella services: error taxonomy, the timeout-bounded
//! HTTP primitive, wire models and tracing setup.

pub mod errors;
pub mod http_client;
pub mod models;
pub mod tracing;

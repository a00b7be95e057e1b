//! "Will it rain today?" core: cached geocoding and forecast lookups,
//! suggestion filtering, and the yes/maybe/no verdict, served over HTTP.

pub mod autocomplete;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod forecast;
pub mod geocoder;
pub mod handlers;
pub mod openapi;
pub mod service;
pub mod suggest;
pub mod verdict;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use service::{LookupSession, RainService};

pub fn router(service: Arc<RainService>) -> Router {
    let state = handlers::AppState { service };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/city", get(handlers::resolve_city))
        .route("/api/suggest", get(handlers::suggest_cities))
        .route("/api/forecast", get(handlers::forecast))
        .route("/api/check", get(handlers::check_city))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use axum::{
    extract::{Query, State},
    response::Json,
};
use common::errors::AppError;
use common::models::{CityVerdict, Location, Verdict};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::service::{LookupSession, RainService};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RainService>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "umbrella-service" }))
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/city",
    params(
        ("name" = String, Query, description = "City name")
    ),
    responses(
        (status = 200, description = "Best matching location", body = Location),
        (status = 400, description = "Empty city name"),
        (status = 404, description = "City not found"),
        (status = 503, description = "Geocoding provider unavailable"),
        (status = 504, description = "Geocoding request timed out")
    ),
    tag = "geocoding"
)]
pub async fn resolve_city(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<Location>, AppError> {
    info!(name = %params.name, "City lookup received");

    let location = state.service.resolve_city(&params.name).await?;

    Ok(Json(location))
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

#[utoipa::path(
    get,
    path = "/api/suggest",
    params(
        ("q" = String, Query, description = "Partial city name, at least 2 characters")
    ),
    responses(
        (status = 200, description = "Up to 5 city suggestions; empty hides the list", body = [Location])
    ),
    tag = "geocoding"
)]
pub async fn suggest_cities(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<Location>> {
    Json(state.service.suggest_cities(&params.q).await)
}

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    pub place: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/forecast",
    params(
        ("lat" = f64, Query, description = "Latitude"),
        ("lon" = f64, Query, description = "Longitude"),
        ("place" = Option<String>, Query, description = "Label used in the verdict text")
    ),
    responses(
        (status = 200, description = "Rain verdict for today", body = Verdict),
        (status = 503, description = "Forecast unavailable")
    ),
    tag = "forecast"
)]
pub async fn forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Verdict>, AppError> {
    info!(lat = params.lat, lon = params.lon, "Forecast request received");

    let verdict = state
        .service
        .forecast_for(params.lat, params.lon, params.place.as_deref())
        .await?;

    Ok(Json(verdict))
}

#[utoipa::path(
    get,
    path = "/api/check",
    params(
        ("name" = String, Query, description = "City name")
    ),
    responses(
        (status = 200, description = "Location and verdict; verdict is ERROR when the forecast failed", body = CityVerdict),
        (status = 400, description = "Empty city name"),
        (status = 404, description = "City not found"),
        (status = 503, description = "Geocoding provider unavailable"),
        (status = 504, description = "Geocoding request timed out")
    ),
    tag = "forecast"
)]
pub async fn check_city(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<CityVerdict>, AppError> {
    info!(name = %params.name, "City check received");

    // each request is its own session; callers order their own requests
    let session = LookupSession::new();
    let result = state.service.check_city(&session, &params.name).await?;

    Ok(Json(result))
}

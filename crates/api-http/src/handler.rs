//! Route Handlers
//!
//! Decode the request, call the catalog, encode the response.

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{AddFruitRequest, HealthResponse, ListQuery, UpdateFruitRequest};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fruits_core::domain::{Fruit, FruitId, Fruits};
use tracing::debug;

/// POST /api/fruits/add
pub async fn add_fruit(
    State(state): State<AppState>,
    payload: Result<Json<AddFruitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Fruit>), ApiError> {
    let Json(req) = payload?;
    let fruit = state.catalog.add(req.into()).await?;
    Ok((StatusCode::CREATED, Json(fruit)))
}

/// PUT /api/fruits/{id}
pub async fn update_fruit(
    State(state): State<AppState>,
    id: Result<Path<FruitId>, PathRejection>,
    payload: Result<Json<UpdateFruitRequest>, JsonRejection>,
) -> Result<Json<Fruit>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let fruit = state.catalog.update(id, req.into()).await?;
    Ok(Json(fruit))
}

/// DELETE /api/fruits/{id} - 204 whether or not the row existed
pub async fn delete_fruit(
    State(state): State<AppState>,
    id: Result<Path<FruitId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.catalog.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/fruits
pub async fn delete_all(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.catalog.remove_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/fruits/{name}
pub async fn get_fruits_by_name(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Fruits>, ApiError> {
    let Path(name) = name?;
    let fruits = state.catalog.by_name(&name).await?;
    debug!(name = %name, matches = fruits.len(), "Lookup by name");
    Ok(Json(fruits))
}

/// GET /api/fruits/season/{season}
pub async fn get_fruits_by_season(
    State(state): State<AppState>,
    season: Result<Path<String>, PathRejection>,
) -> Result<Json<Fruits>, ApiError> {
    let Path(season) = season?;
    let fruits = state.catalog.by_season(&season).await?;
    debug!(season = %season, matches = fruits.len(), "Lookup by season");
    Ok(Json(fruits))
}

/// GET /api/fruits, optionally filtered with `?season=`
pub async fn list_fruits(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Fruits>, ApiError> {
    let Query(query) = query?;
    let fruits = match query.season.as_deref() {
        Some(season) => state.catalog.by_season(season).await?,
        None => state.catalog.list().await?,
    };
    Ok(Json(fruits))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let fruits = state.catalog.count().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: fruits_core::VERSION.to_string(),
        fruits,
    }))
}

// handlers/restaurants.rs - restaurant collection and single-restaurant routes

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::api::format::{RestaurantDetail, RestaurantSummary};
use crate::error::{ApiError, ApiResult};

use super::AppState;

/// GET /restaurants - every restaurant, own fields only
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<RestaurantSummary>>> {
    let restaurants = state.service.list_restaurants().await?;
    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

/// GET /restaurants/:id - restaurant with its priced pizzas
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<RestaurantDetail>> {
    let id = restaurant_id(id)?;
    let menu = state.service.restaurant_menu(id).await?;
    Ok(Json(menu.into()))
}

/// DELETE /restaurants/:id - remove restaurant and its join rows
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = restaurant_id(id)?;
    state.service.delete_restaurant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ids that are not integers cannot name a restaurant
fn restaurant_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id).map_err(|_| ApiError::RestaurantNotFound)
}

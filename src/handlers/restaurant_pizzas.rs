// handlers/restaurant_pizzas.rs - POST /restaurant_pizzas

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::instrument;

use crate::api::format::RestaurantPizzaCreated;
use crate::database::models::ValidationError;
use crate::database::RestaurantPizzaRequest;
use crate::error::ApiResult;

use super::AppState;

const REQUIRED_FIELDS: [&str; 3] = ["price", "pizza_id", "restaurant_id"];

/// POST /restaurant_pizzas - link a pizza to a restaurant at a price
///
/// Every failure (missing key, unknown pizza or restaurant, bad price) answers
/// with the same 400 body.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RestaurantPizzaCreated>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("Unreadable request body: {}", rejection);
        ValidationError::InvalidBody
    })?;

    let request = parse_request(payload)?;
    let created = state.service.create_restaurant_pizza(request).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

fn parse_request(payload: Value) -> Result<RestaurantPizzaRequest, ValidationError> {
    let Value::Object(mut fields) = payload else {
        return Err(ValidationError::InvalidBody);
    };

    let [price, pizza_id, restaurant_id] = REQUIRED_FIELDS
        .map(|key| fields.remove(key).ok_or(ValidationError::MissingField(key)));

    // First missing key in declaration order wins
    let (price, pizza_id, restaurant_id) = (price?, pizza_id?, restaurant_id?);

    Ok(RestaurantPizzaRequest {
        price,
        pizza_id: integer_field(&pizza_id, "pizza_id")?,
        restaurant_id: integer_field(&restaurant_id, "restaurant_id")?,
    })
}

/// A reference id that is not an integer cannot match any row
fn integer_field(value: &Value, key: &'static str) -> Result<i64, ValidationError> {
    value.as_i64().ok_or(ValidationError::NotAnInteger(key))
}

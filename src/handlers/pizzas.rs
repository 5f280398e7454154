// handlers/pizzas.rs - GET /pizzas

use axum::{extract::State, Json};
use tracing::instrument;

use crate::api::format::PizzaSummary;
use crate::error::ApiResult;

use super::AppState;

/// GET /pizzas - every pizza, own fields only
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<PizzaSummary>>> {
    let pizzas = state.service.list_pizzas().await?;
    Ok(Json(pizzas.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use crate::testing::TestContext;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn lists_pizzas_without_join_rows() {
        let ctx = TestContext::seeded().await.unwrap();
        let res = ctx.get("/pizzas").await;

        res.assert_status(StatusCode::OK);
        let body = res.json();
        let pizzas = body.as_array().unwrap();
        assert_eq!(pizzas.len(), 3);
        assert_eq!(
            pizzas[0],
            json!({"id": 1, "name": "Emma", "ingredients": "Dough, Tomato Sauce, Cheese"})
        );
        assert!(pizzas.iter().all(|p| p.get("restaurant_pizzas").is_none()));
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let ctx = TestContext::new().await.unwrap();
        let res = ctx.get("/pizzas").await;

        res.assert_status(StatusCode::OK);
        assert_eq!(res.json(), json!([]));
    }
}

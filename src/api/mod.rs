pub mod format;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{self, AppState};

/// Routes and request tracing, without deployment-specific layers
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::home::root))
        .route("/health", get(handlers::home::health))
        // Resources
        .merge(restaurant_routes())
        .merge(pizza_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Full application as served: routes plus body limit and optional CORS
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let app = router(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn restaurant_routes() -> Router<AppState> {
    use handlers::restaurants;

    Router::new()
        .route("/restaurants", get(restaurants::list))
        .route(
            "/restaurants/:id",
            get(restaurants::show).delete(restaurants::delete),
        )
}

fn pizza_routes() -> Router<AppState> {
    use handlers::{pizzas, restaurant_pizzas};

    Router::new()
        .route("/pizzas", get(pizzas::list))
        .route("/restaurant_pizzas", post(restaurant_pizzas::create))
}

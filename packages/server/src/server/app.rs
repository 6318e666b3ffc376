//! Application state and router assembly.

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes;

#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub db_pool: PgPool,
}

/// Build the application router with all routes and middleware.
pub fn build_app(pool: PgPool, deps: ServerDeps) -> Router {
    let state = AppState {
        deps,
        db_pool: pool,
    };

    Router::new()
        .route("/health", get(routes::health::health_handler))
        .route(
            "/api/properties",
            get(routes::properties::list_properties).post(routes::properties::create_property),
        )
        .route(
            "/api/properties/saved/list",
            get(routes::properties::list_saved_properties),
        )
        .route(
            "/api/properties/:id",
            get(routes::properties::get_property)
                .put(routes::properties::update_property)
                .delete(routes::properties::delete_property),
        )
        .route(
            "/api/properties/:id/save",
            post(routes::properties::save_property).delete(routes::properties::unsave_property),
        )
        .route("/api/ml/predict-price", post(routes::ml::predict_price_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

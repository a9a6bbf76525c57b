//! API Router configuration

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the main API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict_footprint))
        .route("/recommendations", post(handlers::get_recommendations))
        .route("/calculate", post(handlers::calculate_activity))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}

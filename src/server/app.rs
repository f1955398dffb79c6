use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::api::api_routes;
use crate::error::AppError;

use super::AppState;

pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = RequestBodyLimitLayer::new(state.settings.server.max_body_bytes);

    Router::new()
        // API routes
        .merge(api_routes())
        // Unmatched routes get the uniform JSON envelope
        .fallback(not_found)
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(body_limit)
        // Add state
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/translate", post(handlers::translate))
        // Health check
        .route("/api/health", get(handlers::health_check))
        .route("/api/languages", get(handlers::list_languages))
}

/// Full application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    create_routes()
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

use crate::{
    AppState,
    handlers, // Import handlers module
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router and associates routes with handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate_ideas", post(handlers::generate_ideas))
        .route(
            "/api/ideas",
            post(handlers::save_idea).get(handlers::list_ideas),
        )
        .route("/api/ideas/{id}", delete(handlers::delete_idea))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        // JSON-only API; requests are small
        .layer(DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}

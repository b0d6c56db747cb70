//! Router assembly for the cfgsrv HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        // Languages
        .route(
            "/languages",
            get(handlers::languages::list_languages).post(handlers::languages::add_language),
        )
        .route(
            "/languages/{id}",
            get(handlers::languages::get_language)
                .patch(handlers::languages::update_language)
                .delete(handlers::languages::delete_language),
        )
        // Compares
        .route(
            "/compares",
            get(handlers::compares::list_compares).post(handlers::compares::add_compare),
        )
        .route(
            "/compares/{id}",
            get(handlers::compares::get_compare)
                .patch(handlers::compares::update_compare)
                .delete(handlers::compares::delete_compare),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

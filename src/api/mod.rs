//! REST API layer: route handlers, DTOs, extractors and router composition.
//!
//! Resource endpoints are mounted under `/api/v1`; system endpoints and
//! the OpenAPI document live at the root.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());
    with_docs(router)
}

/// Builds the served application: routes, middleware and state.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(feature = "swagger-ui")]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    router.merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
    )
}

#[cfg(not(feature = "swagger-ui"))]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;
    use utoipa::OpenApi;

    router.route(
        "/api-docs/openapi.json",
        get(|| async { Json(openapi::ApiDoc::openapi()) }),
    )
}

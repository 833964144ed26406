//! Recipe catalog service: CRUD over `/api/recipes`, backed by PostgreSQL
//! or an in-memory store.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use store::RecipeStore;

/// Application state shared across all handlers
pub type AppState = Arc<dyn RecipeStore>;

/// Build the full application: recipe routes, Swagger UI, CORS and request
/// tracing, all bound to `store`.
pub fn app(store: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .nest(api::recipes::PATH, api::recipes::router())
        .with_state(store)
        .merge(swagger_ui)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                // 5xx responses are already logged by on_response
                .on_failure(()),
        )
}

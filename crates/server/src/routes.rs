pub mod auth;
pub mod extract;
pub mod items;
pub mod restaurants;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::openapi::ApiDoc;
use self::auth::ServerState;

async fn root() -> &'static str {
    "Data API online"
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> impl IntoResponse {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found(uri: Uri) -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, format!("Not Found - {}", uri.path()))
}

/// Restaurant and menu-item routes, mounted under `/data`.
fn data_routes() -> Router<ServerState> {
    Router::new()
        .route("/restaurants", get(restaurants::list).post(restaurants::create))
        .route(
            "/restaurants/:id",
            get(restaurants::get).put(restaurants::edit).delete(restaurants::delete),
        )
        .route("/items", post(items::add))
        .route("/items/:id", put(items::edit).delete(items::delete))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/data", data_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

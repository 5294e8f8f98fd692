use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, ServiceDescriptor};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod subscriptions;

pub use auth::{ServerAuthConfig, ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service descriptor", body = crate::openapi::ServiceDescriptorDoc)))]
pub async fn index() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::abonnement())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> JsonApiError {
    JsonApiError::new(axum::http::StatusCode::NOT_FOUND, "Not Found", Some("no such route".into()))
}

/// Build the full application router: public routes plus the bearer-protected
/// subscription routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Every subscription route requires a valid bearer token.
    let abonnement = Router::new()
        .route(
            "/abonnement",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/abonnement/add", post(subscriptions::create_subscription))
        .route("/abonnement/:id", get(subscriptions::get_subscription))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token_state,
        ));

    public
        .merge(abonnement)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

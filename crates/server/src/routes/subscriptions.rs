use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use service::auth::Claims;
use service::errors::ServiceError;
use service::subscription::{Created, Subscription};
use tracing::info;

use crate::{errors::JsonApiError, routes::auth::ServerState};

/// Also mounted at `/abonnement/add`.
#[utoipa::path(
    post, path = "/abonnement", tag = "abonnement",
    request_body = crate::openapi::CreateSubscriptionDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CreatedDoc),
        (status = 400, description = "Missing or invalid field", body = crate::openapi::ErrorDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Customer or vehicle not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Unexpected error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearer" = []))
)]
pub async fn create_subscription(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), JsonApiError> {
    let Json(payload) = payload?;
    let created = state.subscriptions.create(&payload).await?;
    info!(subscription_id = created.subscription_id, caller = %claims.sub, "created subscription");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/abonnement", tag = "abonnement",
    responses(
        (status = 200, description = "All subscriptions", body = [crate::openapi::SubscriptionDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Unexpected error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearer" = []))
)]
pub async fn list_subscriptions(State(state): State<ServerState>) -> Result<Json<Vec<Subscription>>, JsonApiError> {
    let all = state.subscriptions.list_all().await?;
    info!(count = all.len(), "list subscriptions");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/abonnement/{id}", tag = "abonnement",
    params(("id" = i64, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::SubscriptionDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Unexpected error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearer" = []))
)]
pub async fn get_subscription(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Subscription>, JsonApiError> {
    let Path(id) = id?;
    // ids are assigned as i32, anything wider was never handed out
    let id = i32::try_from(id).map_err(|_| ServiceError::not_found("subscription"))?;
    Ok(Json(state.subscriptions.get_by_id(id).await?))
}

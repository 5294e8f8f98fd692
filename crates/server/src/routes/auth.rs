use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use service::auth::{bearer_token, verify_token};
use service::subscription::SubscriptionService;

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub subscriptions: Arc<SubscriptionService>,
    pub auth: ServerAuthConfig,
}

/// Route-layer middleware: require `Authorization: Bearer <jwt>` signed with
/// the configured secret. On success the verified claims are placed in the
/// request extensions for handlers.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = bearer_token(header).and_then(|token| verify_token(&state.auth.jwt_secret, token));
    match claims {
        Ok(claims) => {
            tracing::debug!(path = %req.uri().path(), sub = %claims.sub, "bearer token accepted");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), "bearer token rejected");
            Err(e.into())
        }
    }
}

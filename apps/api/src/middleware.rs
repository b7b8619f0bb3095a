use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use nestling_application::{AuthService, AuthorizationService};
use nestling_core::{AppError, UserIdentity};
use nestling_domain::{Action, Resource};

use crate::error::{ACCESS_TOKEN_REQUIRED, ApiResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies the bearer token and attaches the [`UserIdentity`] to the request.
pub async fn require_auth(
    State(auth_service): State<AuthService>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| AppError::Unauthorized(ACCESS_TOKEN_REQUIRED.to_owned()))?;

    let identity = auth_service.authenticate(token)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Fixed `(resource, action)` requirement for one route.
#[derive(Clone)]
pub struct PermissionGate {
    pub authorization: AuthorizationService,
    pub resource: Resource,
    pub action: Action,
}

/// Rejects requests whose authenticated role lacks the gate's permission.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = request
        .extensions()
        .get::<UserIdentity>()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;

    gate.authorization
        .require_permission(identity, gate.resource, gate.action)?;

    Ok(next.run(request).await)
}

use axum::Json;
use axum::extract::{Extension, State};
use nestling_core::{AppError, UserIdentity};
use tracing::{info, warn};

use crate::dto::{LoginRequest, LoginResponse, MeResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .inspect_err(|error| {
            if matches!(error, AppError::InvalidCredentials) {
                warn!(email = %payload.email, "login failed");
            }
        })?;

    info!(user_id = outcome.user.id, role = %outcome.role.name, "user logged in");
    Ok(Json(LoginResponse::from(outcome)))
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Json<MeResponse> {
    let permissions = state
        .authorization_service
        .permissions_for(user.role_name())
        .clone();

    Json(MeResponse {
        identity: user,
        permissions,
    })
}

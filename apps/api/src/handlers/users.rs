use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use nestling_application::UserService;
use nestling_domain::{User, UserDraft, UserPatch};

use crate::error::{ApiJson, ApiPath, ApiResult};

pub async fn list_users_handler(State(service): State<UserService>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(service.list().await?))
}

pub async fn get_user_handler(
    State(service): State<UserService>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<User>> {
    Ok(Json(service.get(user_id).await?))
}

pub async fn create_user_handler(
    State(service): State<UserService>,
    ApiJson(draft): ApiJson<UserDraft>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user_handler(
    State(service): State<UserService>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> ApiResult<Json<User>> {
    Ok(Json(service.update(user_id, patch).await?))
}

pub async fn delete_user_handler(
    State(service): State<UserService>,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    service.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Handlers shared by every uniform CRUD resource.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use nestling_application::RecordService;
use nestling_domain::Record;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiJson, ApiPath, ApiResult};

pub async fn list_records_handler<R>(
    State(service): State<RecordService<R>>,
) -> ApiResult<Json<Vec<R>>>
where
    R: Record + Serialize,
{
    Ok(Json(service.list().await?))
}

pub async fn get_record_handler<R>(
    State(service): State<RecordService<R>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<R>>
where
    R: Record + Serialize,
{
    Ok(Json(service.get(id).await?))
}

pub async fn create_record_handler<R>(
    State(service): State<RecordService<R>>,
    ApiJson(draft): ApiJson<R::Draft>,
) -> ApiResult<(StatusCode, Json<R>)>
where
    R: Record + Serialize,
    R::Draft: DeserializeOwned,
{
    let record = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record_handler<R>(
    State(service): State<RecordService<R>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> ApiResult<Json<R>>
where
    R: Record + Serialize,
    R::Patch: DeserializeOwned,
{
    Ok(Json(service.update(id, patch).await?))
}

pub async fn delete_record_handler<R>(
    State(service): State<RecordService<R>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode>
where
    R: Record,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::Json;
use axum::extract::State;
use nestling_application::RecordService;
use nestling_domain::{Child, ChildPatch};
use tracing::info;

use crate::dto::MoveChildRequest;
use crate::error::{ApiJson, ApiPath, ApiResult};

pub async fn move_child_handler(
    State(service): State<RecordService<Child>>,
    ApiPath(child_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<MoveChildRequest>,
) -> ApiResult<Json<Child>> {
    let child = service
        .update(child_id, ChildPatch::move_to_class(payload.class_id))
        .await?;

    info!(child_id, class_id = payload.class_id, "child moved to class");
    Ok(Json(child))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::stage::{StageRequest, StageResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stages/",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all stages successfully", body = Vec<StageResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "stages"
)]
pub async fn list_stages(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<StageResponse>>> {
    let stages = services::list_stages(db.pool()).await?;

    Ok(Json(stages))
}

#[utoipa::path(
    get,
    path = "/api/stages/{id}/",
    params(
        ("id" = Uuid, Path, description = "Stage ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stage found", body = StageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Stage not found")
    ),
    tag = "stages"
)]
pub async fn get_stage(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let stage = services::get_stage(db.pool(), id).await?;

    Ok(Json(stage).into_response())
}

#[utoipa::path(
    post,
    path = "/api/stages/",
    request_body = StageRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Stage created successfully", body = StageResponse),
        (status = 400, description = "Validation error or date outside the competition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required")
    ),
    tag = "stages"
)]
pub async fn create_stage(
    State(db): State<Database>,
    ApiJson(req): ApiJson<StageRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let stage = services::create_stage(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(stage)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/stages/{id}/",
    params(
        ("id" = Uuid, Path, description = "Stage ID")
    ),
    request_body = StageRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stage updated successfully", body = StageResponse),
        (status = 400, description = "Validation error or date outside the competition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Stage not found")
    ),
    tag = "stages"
)]
pub async fn update_stage(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<StageRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let updated = services::update_stage(db.pool(), id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/stages/{id}/",
    params(
        ("id" = Uuid, Path, description = "Stage ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Stage deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Stage not found")
    ),
    tag = "stages"
)]
pub async fn delete_stage(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    services::delete_stage(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::sport::{SportRequest, SportResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/sports/",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all sports successfully", body = Vec<SportResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "sports"
)]
pub async fn list_sports(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<SportResponse>>> {
    let sports = services::list_sports(db.pool()).await?;

    Ok(Json(sports))
}

#[utoipa::path(
    get,
    path = "/api/sports/{id}/",
    params(
        ("id" = Uuid, Path, description = "Sport ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sport found", body = SportResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Sport not found")
    ),
    tag = "sports"
)]
pub async fn get_sport(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let sport = services::get_sport(db.pool(), id).await?;

    Ok(Json(sport).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sports/",
    request_body = SportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Sport created successfully", body = SportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required")
    ),
    tag = "sports"
)]
pub async fn create_sport(
    State(db): State<Database>,
    ApiJson(req): ApiJson<SportRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let sport = services::create_sport(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(sport)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/sports/{id}/",
    params(
        ("id" = Uuid, Path, description = "Sport ID")
    ),
    request_body = SportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sport updated successfully", body = SportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Sport not found")
    ),
    tag = "sports"
)]
pub async fn update_sport(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<SportRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let updated = services::update_sport(db.pool(), id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/sports/{id}/",
    params(
        ("id" = Uuid, Path, description = "Sport ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Sport deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Sport not found")
    ),
    tag = "sports"
)]
pub async fn delete_sport(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    services::delete_sport(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

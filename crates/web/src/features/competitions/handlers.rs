use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::competition::{CompetitionRequest, CompetitionResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions/",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all competitions successfully", body = Vec<CompetitionResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<CompetitionResponse>>> {
    let competitions = services::list_competitions(db.pool()).await?;

    Ok(Json(competitions))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition found", body = CompetitionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let competition = services::get_competition(db.pool(), id).await?;

    Ok(Json(competition).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/",
    request_body = CompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Competition created successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CompetitionRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let competition = services::create_competition(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}/",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    request_body = CompetitionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Competition updated successfully", body = CompetitionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<CompetitionRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let updated = services::update_competition(db.pool(), id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}/",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Competition deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    services::delete_competition(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

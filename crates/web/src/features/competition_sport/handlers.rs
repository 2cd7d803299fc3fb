use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::competition_sport::CompetitionSportRequest,
    models::CompetitionSport,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extract::ApiJson;

use super::services;

#[utoipa::path(
    get,
    path = "/api/competition_sport/",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all competition/sport links successfully", body = Vec<CompetitionSport>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "competition_sport"
)]
pub async fn list_links(
    State(db): State<Database>,
) -> ApiResult<Json<Vec<CompetitionSport>>> {
    let links = services::list_links(db.pool()).await?;

    Ok(Json(links))
}

#[utoipa::path(
    get,
    path = "/api/competition_sport/{id}/",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Link found", body = CompetitionSport),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Link not found")
    ),
    tag = "competition_sport"
)]
pub async fn get_link(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let link = services::get_link(db.pool(), id).await?;

    Ok(Json(link).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competition_sport/",
    request_body = CompetitionSportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Link created successfully", body = CompetitionSport),
        (status = 400, description = "Unknown competition or sport, or duplicate pair"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required")
    ),
    tag = "competition_sport"
)]
pub async fn create_link(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CompetitionSportRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let link = services::create_link(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(link)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/competition_sport/{id}/",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    request_body = CompetitionSportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Link updated successfully", body = CompetitionSport),
        (status = 400, description = "Unknown competition or sport, or duplicate pair"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Link not found")
    ),
    tag = "competition_sport"
)]
pub async fn update_link(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<CompetitionSportRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let updated = services::update_link(db.pool(), id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competition_sport/{id}/",
    params(
        ("id" = Uuid, Path, description = "Link ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Link deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser required"),
        (status = 404, description = "Link not found")
    ),
    tag = "competition_sport"
)]
pub async fn delete_link(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    services::delete_link(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use storage::{
    Database,
    dto::common::PaginationParams,
    error::{Result as StorageResult, StorageError},
    repository::{
        competition::CompetitionRepository, competition_sport::CompetitionSportRepository,
        sport::SportRepository, stage::StageRepository,
    },
};
use uuid::Uuid;

use super::templates;
use crate::error::WebError;
use crate::middleware::auth::{MaybeSession, RequireLogin, redirect_found};

/// `?id=` on the detail pages
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub id: Option<String>,
}

impl DetailParams {
    fn uuid(&self) -> Option<Uuid> {
        self.id
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| Uuid::parse_str(raw).ok())
    }
}

/// Treats a missing row as absence rather than failure
fn found<T>(result: StorageResult<T>) -> StorageResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn index(
    State(db): State<Database>,
    MaybeSession(session): MaybeSession,
) -> Result<Html<String>, WebError> {
    let competitions = CompetitionRepository::new(db.pool()).count().await?;
    let sports = SportRepository::new(db.pool()).count().await?;
    let username = session.as_ref().map(|claims| claims.username.as_str());

    Ok(Html(templates::index(competitions, sports, username)))
}

pub async fn competitions(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, WebError> {
    let repo = CompetitionRepository::new(db.pool());
    let meta = params.resolve(repo.count().await?);
    let items = repo.list_page(&meta).await?;

    Ok(Html(templates::competitions(&items, &meta, Some(&claims.username))))
}

pub async fn sports(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, WebError> {
    let repo = SportRepository::new(db.pool());
    let meta = params.resolve(repo.count().await?);
    let items = repo.list_page(&meta).await?;

    Ok(Html(templates::sports(&items, &meta, Some(&claims.username))))
}

pub async fn stages(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<PaginationParams>,
) -> Result<Html<String>, WebError> {
    let repo = StageRepository::new(db.pool());
    let meta = params.resolve(repo.count().await?);
    let items = repo.list_page(&meta).await?;

    Ok(Html(templates::stages(&items, &meta, Some(&claims.username))))
}

pub async fn competition(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<DetailParams>,
) -> Result<Response, WebError> {
    let Some(id) = params.uuid() else {
        return Ok(redirect_found("/competitions/"));
    };
    let repo = CompetitionRepository::new(db.pool());
    let Some(competition) = found(repo.find_by_id(id).await)? else {
        return Ok(redirect_found("/competitions/"));
    };

    let sport_repo = SportRepository::new(db.pool());
    let mut sports = Vec::new();
    for sport_id in repo.sport_ids(id).await? {
        if let Some(sport) = found(sport_repo.find_by_id(sport_id).await)? {
            sports.push((sport.id.to_string(), sport.title));
        }
    }

    Ok(Html(templates::competition(&competition, &sports, Some(&claims.username))).into_response())
}

pub async fn sport(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<DetailParams>,
) -> Result<Response, WebError> {
    let Some(id) = params.uuid() else {
        return Ok(redirect_found("/sports/"));
    };
    let repo = SportRepository::new(db.pool());
    let Some(sport) = found(repo.find_by_id(id).await)? else {
        return Ok(redirect_found("/sports/"));
    };

    let competition_repo = CompetitionRepository::new(db.pool());
    let mut competitions = Vec::new();
    for competition_id in repo.competition_ids(id).await? {
        if let Some(competition) = found(competition_repo.find_by_id(competition_id).await)? {
            competitions.push((competition.id.to_string(), competition.title));
        }
    }

    Ok(Html(templates::sport(&sport, &competitions, Some(&claims.username))).into_response())
}

pub async fn stage(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
    Query(params): Query<DetailParams>,
) -> Result<Response, WebError> {
    let Some(id) = params.uuid() else {
        return Ok(redirect_found("/stages/"));
    };
    let Some(stage) = found(StageRepository::new(db.pool()).find_by_id(id).await)? else {
        return Ok(redirect_found("/stages/"));
    };

    let link = found(
        CompetitionSportRepository::new(db.pool())
            .find_by_id(stage.competition_sport)
            .await,
    )?;
    let (competition, sport) = match link {
        Some(link) => (
            found(CompetitionRepository::new(db.pool()).find_by_id(link.competition).await)?,
            found(SportRepository::new(db.pool()).find_by_id(link.sport).await)?,
        ),
        None => (None, None),
    };

    Ok(Html(templates::stage(
        &stage,
        competition.as_ref(),
        sport.as_ref(),
        Some(&claims.username),
    ))
    .into_response())
}

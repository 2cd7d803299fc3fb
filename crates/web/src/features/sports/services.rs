use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::sport::{SportRequest, SportResponse},
    error::Result,
    repository::{competition_sport::CompetitionSportRepository, sport::SportRepository},
};
use uuid::Uuid;

pub async fn list_sports(pool: &PgPool) -> Result<Vec<SportResponse>> {
    let sports = SportRepository::new(pool).list().await?;
    let links = CompetitionSportRepository::new(pool).list().await?;

    let mut competitions: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        competitions
            .entry(link.sport)
            .or_default()
            .push(link.competition);
    }

    Ok(sports
        .into_iter()
        .map(|sport| {
            let ids = competitions.remove(&sport.id).unwrap_or_default();
            SportResponse::new(sport, ids)
        })
        .collect())
}

pub async fn get_sport(pool: &PgPool, id: Uuid) -> Result<SportResponse> {
    let repo = SportRepository::new(pool);
    let sport = repo.find_by_id(id).await?;
    let competitions = repo.competition_ids(id).await?;

    Ok(SportResponse::new(sport, competitions))
}

pub async fn create_sport(pool: &PgPool, request: &SportRequest) -> Result<SportResponse> {
    let repo = SportRepository::new(pool);
    let sport = repo.create(request).await?;
    tracing::info!(id = %sport.id, title = %sport.title, "Created sport");

    let competitions = repo.competition_ids(sport.id).await?;
    Ok(SportResponse::new(sport, competitions))
}

pub async fn update_sport(pool: &PgPool, id: Uuid, request: &SportRequest) -> Result<SportResponse> {
    let repo = SportRepository::new(pool);
    let sport = repo.update(id, request).await?;
    tracing::info!(id = %sport.id, "Updated sport");

    let competitions = repo.competition_ids(id).await?;
    Ok(SportResponse::new(sport, competitions))
}

pub async fn delete_sport(pool: &PgPool, id: Uuid) -> Result<()> {
    SportRepository::new(pool).delete(id).await?;
    tracing::info!(%id, "Deleted sport");
    Ok(())
}

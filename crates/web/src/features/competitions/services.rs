use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::competition::{CompetitionRequest, CompetitionResponse},
    error::Result,
    repository::{
        competition::CompetitionRepository, competition_sport::CompetitionSportRepository,
    },
};
use uuid::Uuid;

/// List all competitions with their sport IDs
pub async fn list_competitions(pool: &PgPool) -> Result<Vec<CompetitionResponse>> {
    let competitions = CompetitionRepository::new(pool).list().await?;
    let links = CompetitionSportRepository::new(pool).list().await?;

    let mut sports: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        sports.entry(link.competition).or_default().push(link.sport);
    }

    Ok(competitions
        .into_iter()
        .map(|competition| {
            let ids = sports.remove(&competition.id).unwrap_or_default();
            CompetitionResponse::new(competition, ids)
        })
        .collect())
}

/// Get one competition by ID
pub async fn get_competition(pool: &PgPool, id: Uuid) -> Result<CompetitionResponse> {
    let repo = CompetitionRepository::new(pool);
    let competition = repo.find_by_id(id).await?;
    let sports = repo.sport_ids(id).await?;

    Ok(CompetitionResponse::new(competition, sports))
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CompetitionRequest,
) -> Result<CompetitionResponse> {
    let repo = CompetitionRepository::new(pool);
    let competition = repo.create(request).await?;
    tracing::info!(id = %competition.id, title = %competition.title, "Created competition");

    let sports = repo.sport_ids(competition.id).await?;
    Ok(CompetitionResponse::new(competition, sports))
}

/// Replace a competition
pub async fn update_competition(
    pool: &PgPool,
    id: Uuid,
    request: &CompetitionRequest,
) -> Result<CompetitionResponse> {
    let repo = CompetitionRepository::new(pool);
    let competition = repo.update(id, request).await?;
    tracing::info!(id = %competition.id, "Updated competition");

    let sports = repo.sport_ids(id).await?;
    Ok(CompetitionResponse::new(competition, sports))
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: Uuid) -> Result<()> {
    CompetitionRepository::new(pool).delete(id).await?;
    tracing::info!(%id, "Deleted competition");
    Ok(())
}

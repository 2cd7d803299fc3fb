use sqlx::PgPool;
use storage::{
    dto::competition_sport::CompetitionSportRequest, error::Result, models::CompetitionSport,
    repository::competition_sport::CompetitionSportRepository,
};
use uuid::Uuid;

pub async fn list_links(pool: &PgPool) -> Result<Vec<CompetitionSport>> {
    CompetitionSportRepository::new(pool).list().await
}

pub async fn get_link(pool: &PgPool, id: Uuid) -> Result<CompetitionSport> {
    CompetitionSportRepository::new(pool).find_by_id(id).await
}

pub async fn create_link(
    pool: &PgPool,
    request: &CompetitionSportRequest,
) -> Result<CompetitionSport> {
    CompetitionSportRepository::new(pool).create(request).await
}

pub async fn update_link(
    pool: &PgPool,
    id: Uuid,
    request: &CompetitionSportRequest,
) -> Result<CompetitionSport> {
    let link = CompetitionSportRepository::new(pool)
        .update(id, request)
        .await?;
    tracing::info!(id = %link.id, "Updated competition_sport");
    Ok(link)
}

/// Removing a link also removes the stages held under it
pub async fn delete_link(pool: &PgPool, id: Uuid) -> Result<()> {
    CompetitionSportRepository::new(pool).delete(id).await?;
    tracing::info!(%id, "Deleted competition_sport");
    Ok(())
}

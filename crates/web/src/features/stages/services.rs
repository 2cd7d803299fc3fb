use sqlx::PgPool;
use storage::{
    dto::stage::{StageRequest, StageResponse},
    error::Result,
    repository::stage::StageRepository,
};
use uuid::Uuid;

pub async fn list_stages(pool: &PgPool) -> Result<Vec<StageResponse>> {
    let stages = StageRepository::new(pool).list().await?;
    Ok(stages.into_iter().map(StageResponse::from).collect())
}

pub async fn get_stage(pool: &PgPool, id: Uuid) -> Result<StageResponse> {
    let stage = StageRepository::new(pool).find_by_id(id).await?;
    Ok(StageResponse::from(stage))
}

/// Create a stage; its date must fit the competition's range
pub async fn create_stage(pool: &PgPool, request: &StageRequest) -> Result<StageResponse> {
    let stage = StageRepository::new(pool).create(request).await?;
    tracing::info!(id = %stage.id, title = %stage.title, "Created stage");
    Ok(StageResponse::from(stage))
}

pub async fn update_stage(pool: &PgPool, id: Uuid, request: &StageRequest) -> Result<StageResponse> {
    let stage = StageRepository::new(pool).update(id, request).await?;
    tracing::info!(id = %stage.id, "Updated stage");
    Ok(StageResponse::from(stage))
}

pub async fn delete_stage(pool: &PgPool, id: Uuid) -> Result<()> {
    StageRepository::new(pool).delete(id).await?;
    tracing::info!(%id, "Deleted stage");
    Ok(())
}

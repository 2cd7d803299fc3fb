use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::competition_sport::CompetitionSportRequest;
use crate::error::{Result, StorageError};
use crate::models::CompetitionSport;

use super::stage::{StagesOf, recheck_stage_dates};

const COLUMNS: &str = "id, competition_id, sport_id, created";

pub const MESSAGE_DUPLICATE_PAIR: &str =
    "The fields competition, sport must make a unique set.";
pub const MESSAGE_UNKNOWN_PAIR_MEMBER: &str = "Invalid pk - competition or sport does not exist.";

/// Repository for the competition/sport association
pub struct CompetitionSportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionSportRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<CompetitionSport>> {
        let links = sqlx::query_as::<_, CompetitionSport>(&format!(
            "SELECT {COLUMNS} FROM competition_sport ORDER BY created, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(links)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<CompetitionSport> {
        sqlx::query_as::<_, CompetitionSport>(&format!(
            "SELECT {COLUMNS} FROM competition_sport WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Creates the association record directly
    pub async fn create(&self, req: &CompetitionSportRequest) -> Result<CompetitionSport> {
        let link = CompetitionSport::new(req.competition, req.sport);
        let created = insert(self.pool, &link).await?;

        tracing::info!(
            competition = %created.competition,
            sport = %created.sport,
            "Linked sport to competition"
        );
        Ok(created)
    }

    /// Re-points an association; its `created` stamp is kept and rechecked,
    /// and its stages must fit the competition it now points to.
    pub async fn update(&self, id: Uuid, req: &CompetitionSportRequest) -> Result<CompetitionSport> {
        let mut link = self.find_by_id(id).await?;
        link.competition = req.competition;
        link.sport = req.sport;
        link.check()?;

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query_as::<_, CompetitionSport>(&format!(
            "UPDATE competition_sport SET competition_id = $2, sport_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(link.id)
        .bind(link.competition)
        .bind(link.sport)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            StorageError::from(e).classify(MESSAGE_DUPLICATE_PAIR, MESSAGE_UNKNOWN_PAIR_MEMBER)
        })?
        .ok_or(StorageError::NotFound)?;

        recheck_stage_dates(&mut *tx, StagesOf::CompetitionSport(updated.id)).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Deletes the association and, by cascade, its stages
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competition_sport WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Validates and writes one association row.
///
/// Shared by the direct create above and by the relation helpers on the
/// competition and sport repositories, which pass their transaction.
pub async fn insert<'e, E>(executor: E, link: &CompetitionSport) -> Result<CompetitionSport>
where
    E: PgExecutor<'e>,
{
    link.check()?;

    let created = sqlx::query_as::<_, CompetitionSport>(&format!(
        "INSERT INTO competition_sport (id, competition_id, sport_id, created)
         VALUES ($1, $2, $3, $4)
         RETURNING {COLUMNS}"
    ))
    .bind(link.id)
    .bind(link.competition)
    .bind(link.sport)
    .bind(link.created)
    .fetch_one(executor)
    .await
    .map_err(|e| StorageError::from(e).classify(MESSAGE_DUPLICATE_PAIR, MESSAGE_UNKNOWN_PAIR_MEMBER))?;

    Ok(created)
}

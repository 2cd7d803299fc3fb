use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationMeta;
use crate::dto::competition::CompetitionRequest;
use crate::error::{Result, StorageError};
use crate::models::{Competition, CompetitionSport};

use super::competition_sport;
use super::stage::{StagesOf, recheck_stage_dates};

const COLUMNS: &str = "id, title, date_of_start, date_of_end, created, modified";

pub const MESSAGE_DUPLICATE_TITLE: &str = "competition with this title already exists.";
pub const MESSAGE_UNKNOWN_SPORT: &str = "Invalid pk - sport does not exist.";

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COLUMNS} FROM competition ORDER BY date_of_start, title"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// One page of competitions for the list view
    pub async fn list_page(&self, page: &PaginationMeta) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COLUMNS} FROM competition
             ORDER BY date_of_start, title
             LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM competition")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Get a competition by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        sqlx::query_as::<_, Competition>(&format!(
            "SELECT {COLUMNS} FROM competition WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// IDs of the sports attached to a competition
    pub async fn sport_ids(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT sport_id FROM competition_sport WHERE competition_id = $1 ORDER BY created, sport_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Create a new competition, optionally with its sports
    pub async fn create(&self, req: &CompetitionRequest) -> Result<Competition> {
        let competition = Competition::new(req.title.clone(), req.date_of_start, req.date_of_end);
        competition.check()?;

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Competition>(&format!(
            "INSERT INTO competition (id, title, date_of_start, date_of_end, created, modified)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        ))
        .bind(competition.id)
        .bind(&competition.title)
        .bind(competition.date_of_start)
        .bind(competition.date_of_end)
        .bind(competition.created)
        .bind(competition.modified)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_SPORT))?;

        if let Some(sports) = &req.sports {
            replace_sports(&mut *tx, created.id, sports).await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Replace an existing competition's fields and, when given, its sports.
    /// Stages left outside the new date range reject the whole update.
    pub async fn update(&self, id: Uuid, req: &CompetitionRequest) -> Result<Competition> {
        let mut competition = self.find_by_id(id).await?;
        competition.title = req.title.clone();
        competition.date_of_start = req.date_of_start;
        competition.date_of_end = req.date_of_end;
        competition.touch();

        let mut tx = self.pool.begin().await?;
        let saved = persist(&mut *tx, &competition).await?;
        if let Some(sports) = &req.sports {
            replace_sports(&mut *tx, saved.id, sports).await?;
        }
        recheck_stage_dates(&mut *tx, StagesOf::Competition(saved.id)).await?;
        tx.commit().await?;

        Ok(saved)
    }

    /// Persist a modified competition after re-running its rules
    pub async fn save(&self, competition: &Competition) -> Result<Competition> {
        let mut tx = self.pool.begin().await?;
        let saved = persist(&mut *tx, competition).await?;
        recheck_stage_dates(&mut *tx, StagesOf::Competition(saved.id)).await?;
        tx.commit().await?;

        Ok(saved)
    }

    /// Attach a sport through a new association record
    pub async fn add_sport(&self, competition_id: Uuid, sport_id: Uuid) -> Result<CompetitionSport> {
        competition_sport::insert(self.pool, &CompetitionSport::new(competition_id, sport_id)).await
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM competition WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn persist(conn: &mut PgConnection, competition: &Competition) -> Result<Competition> {
    competition.check()?;

    sqlx::query_as::<_, Competition>(&format!(
        "UPDATE competition
         SET title = $2, date_of_start = $3, date_of_end = $4, created = $5, modified = $6
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(competition.id)
    .bind(&competition.title)
    .bind(competition.date_of_start)
    .bind(competition.date_of_end)
    .bind(competition.created)
    .bind(competition.modified)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_SPORT))?
    .ok_or(StorageError::NotFound)
}

/// Makes `sports` the exact sport set of a competition. Dropped
/// associations take their stages with them.
async fn replace_sports(conn: &mut PgConnection, competition_id: Uuid, sports: &[Uuid]) -> Result<()> {
    sqlx::query("DELETE FROM competition_sport WHERE competition_id = $1 AND NOT (sport_id = ANY($2))")
        .bind(competition_id)
        .bind(sports)
        .execute(&mut *conn)
        .await?;

    let mut seen = sqlx::query_scalar::<_, Uuid>(
        "SELECT sport_id FROM competition_sport WHERE competition_id = $1",
    )
    .bind(competition_id)
    .fetch_all(&mut *conn)
    .await?;

    for &sport_id in sports {
        if seen.contains(&sport_id) {
            continue;
        }
        competition_sport::insert(&mut *conn, &CompetitionSport::new(competition_id, sport_id)).await?;
        seen.push(sport_id);
    }

    Ok(())
}

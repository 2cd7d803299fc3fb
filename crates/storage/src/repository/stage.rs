use chrono::NaiveDate;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationMeta;
use crate::dto::stage::StageRequest;
use crate::error::{Result, StorageError};
use crate::models::Stage;
use crate::rules::{CompetitionBounds, check_stage_date};

const COLUMNS: &str = "id, title, date, place, competition_sport_id, created, modified";

pub const MESSAGE_DUPLICATE_TITLE: &str =
    "The fields title, competition_sport must make a unique set.";
pub const MESSAGE_UNKNOWN_COMPETITION_SPORT: &str =
    "Invalid pk - competition_sport does not exist.";

#[derive(Debug, FromRow)]
struct BoundsRow {
    competition_id: Option<Uuid>,
    date_of_start: Option<NaiveDate>,
    date_of_end: Option<NaiveDate>,
}

#[derive(Debug, FromRow)]
struct DatedStageRow {
    date: Option<NaiveDate>,
    competition_id: Option<Uuid>,
    date_of_start: Option<NaiveDate>,
    date_of_end: Option<NaiveDate>,
}

/// Which stages [`recheck_stage_dates`] looks at
#[derive(Debug, Clone, Copy)]
pub(crate) enum StagesOf {
    Competition(Uuid),
    CompetitionSport(Uuid),
}

/// Repository for Stage database operations
pub struct StageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StageRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Stage>> {
        let stages = sqlx::query_as::<_, Stage>(&format!(
            "SELECT {COLUMNS} FROM stage ORDER BY date, title"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(stages)
    }

    pub async fn list_page(&self, page: &PaginationMeta) -> Result<Vec<Stage>> {
        let stages = sqlx::query_as::<_, Stage>(&format!(
            "SELECT {COLUMNS} FROM stage ORDER BY date, title LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(stages)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stage")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Stage> {
        sqlx::query_as::<_, Stage>(&format!("SELECT {COLUMNS} FROM stage WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Create a stage after checking its date against the competition
    pub async fn create(&self, req: &StageRequest) -> Result<Stage> {
        let stage = Stage::new(
            req.title.clone(),
            req.date,
            req.place.clone(),
            req.competition_sport,
        );

        let mut tx = self.pool.begin().await?;
        let bounds = competition_bounds(&mut *tx, stage.competition_sport).await?;
        stage.check(bounds)?;

        let created = sqlx::query_as::<_, Stage>(&format!(
            "INSERT INTO stage (id, title, date, place, competition_sport_id, created, modified)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        ))
        .bind(stage.id)
        .bind(&stage.title)
        .bind(stage.date)
        .bind(&stage.place)
        .bind(stage.competition_sport)
        .bind(stage.created)
        .bind(stage.modified)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_COMPETITION_SPORT)
        })?;

        tx.commit().await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, req: &StageRequest) -> Result<Stage> {
        let mut stage = self.find_by_id(id).await?;
        stage.title = req.title.clone();
        stage.date = req.date;
        stage.place = req.place.clone();
        stage.competition_sport = req.competition_sport;
        stage.touch();

        self.save(&stage).await
    }

    /// Persist a modified stage; the date bounds are re-derived every time
    pub async fn save(&self, stage: &Stage) -> Result<Stage> {
        let mut tx = self.pool.begin().await?;
        let bounds = competition_bounds(&mut *tx, stage.competition_sport).await?;
        stage.check(bounds)?;

        let saved = sqlx::query_as::<_, Stage>(&format!(
            "UPDATE stage
             SET title = $2, date = $3, place = $4, competition_sport_id = $5,
                 created = $6, modified = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        ))
        .bind(stage.id)
        .bind(&stage.title)
        .bind(stage.date)
        .bind(&stage.place)
        .bind(stage.competition_sport)
        .bind(stage.created)
        .bind(stage.modified)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_COMPETITION_SPORT)
        })?
        .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM stage WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Resolves competition_sport to its competition's date range.
///
/// An unknown competition_sport is a bad reference; one whose competition
/// row is gone yields `None` so the stage rules can reject it.
async fn competition_bounds(
    conn: &mut PgConnection,
    competition_sport_id: Uuid,
) -> Result<Option<CompetitionBounds>> {
    let row = sqlx::query_as::<_, BoundsRow>(
        "SELECT c.id AS competition_id, c.date_of_start, c.date_of_end
         FROM competition_sport cs
         LEFT JOIN competition c ON c.id = cs.competition_id
         WHERE cs.id = $1",
    )
    .bind(competition_sport_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| StorageError::InvalidReference(MESSAGE_UNKNOWN_COMPETITION_SPORT.to_string()))?;

    Ok(row
        .competition_id
        .map(|_| CompetitionBounds::new(row.date_of_start, row.date_of_end)))
}

/// Checks the dated stages in `scope` against the competition they resolve
/// to right now. Run inside the transaction that moved the bounds.
pub(crate) async fn recheck_stage_dates(conn: &mut PgConnection, scope: StagesOf) -> Result<()> {
    let (column, id) = match scope {
        StagesOf::Competition(id) => ("cs.competition_id", id),
        StagesOf::CompetitionSport(id) => ("cs.id", id),
    };

    let rows = sqlx::query_as::<_, DatedStageRow>(&format!(
        "SELECT s.date, c.id AS competition_id, c.date_of_start, c.date_of_end
         FROM stage s
         JOIN competition_sport cs ON cs.id = s.competition_sport_id
         LEFT JOIN competition c ON c.id = cs.competition_id
         WHERE {column} = $1 AND s.date IS NOT NULL
         ORDER BY s.date"
    ))
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    for row in rows {
        let bounds = row
            .competition_id
            .map(|_| CompetitionBounds::new(row.date_of_start, row.date_of_end));
        check_stage_date(row.date, bounds)?;
    }

    Ok(())
}

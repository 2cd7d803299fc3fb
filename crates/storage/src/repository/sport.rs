use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationMeta;
use crate::dto::sport::SportRequest;
use crate::error::{Result, StorageError};
use crate::models::{CompetitionSport, Sport};

use super::competition_sport;

const COLUMNS: &str = "id, title, description, created, modified";

pub const MESSAGE_DUPLICATE_TITLE: &str = "sport with this title already exists.";
pub const MESSAGE_UNKNOWN_COMPETITION: &str = "Invalid pk - competition does not exist.";

pub struct SportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SportRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Sport>> {
        let sports = sqlx::query_as::<_, Sport>(&format!(
            "SELECT {COLUMNS} FROM sport ORDER BY title"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn list_page(&self, page: &PaginationMeta) -> Result<Vec<Sport>> {
        let sports = sqlx::query_as::<_, Sport>(&format!(
            "SELECT {COLUMNS} FROM sport ORDER BY title LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sport")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Sport> {
        sqlx::query_as::<_, Sport>(&format!("SELECT {COLUMNS} FROM sport WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// IDs of the competitions a sport takes part in
    pub async fn competition_ids(&self, id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT competition_id FROM competition_sport WHERE sport_id = $1 ORDER BY created, competition_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn create(&self, req: &SportRequest) -> Result<Sport> {
        let sport = Sport::new(req.title.clone(), req.description.clone());
        sport.check()?;

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Sport>(&format!(
            "INSERT INTO sport (id, title, description, created, modified)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        ))
        .bind(sport.id)
        .bind(&sport.title)
        .bind(&sport.description)
        .bind(sport.created)
        .bind(sport.modified)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_COMPETITION)
        })?;

        if let Some(competitions) = &req.competitions {
            replace_competitions(&mut *tx, created.id, competitions).await?;
        }

        tx.commit().await?;

        Ok(created)
    }

    pub async fn update(&self, id: Uuid, req: &SportRequest) -> Result<Sport> {
        let mut sport = self.find_by_id(id).await?;
        sport.title = req.title.clone();
        sport.description = req.description.clone();
        sport.touch();

        let mut tx = self.pool.begin().await?;
        let saved = persist(&mut *tx, &sport).await?;
        if let Some(competitions) = &req.competitions {
            replace_competitions(&mut *tx, saved.id, competitions).await?;
        }
        tx.commit().await?;

        Ok(saved)
    }

    pub async fn save(&self, sport: &Sport) -> Result<Sport> {
        let mut conn = self.pool.acquire().await?;
        persist(&mut *conn, sport).await
    }

    /// Attach this sport to a competition through a new association record
    pub async fn add_competition(
        &self,
        sport_id: Uuid,
        competition_id: Uuid,
    ) -> Result<CompetitionSport> {
        competition_sport::insert(self.pool, &CompetitionSport::new(competition_id, sport_id)).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sport WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn persist(conn: &mut PgConnection, sport: &Sport) -> Result<Sport> {
    sport.check()?;

    sqlx::query_as::<_, Sport>(&format!(
        "UPDATE sport
         SET title = $2, description = $3, created = $4, modified = $5
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(sport.id)
    .bind(&sport.title)
    .bind(&sport.description)
    .bind(sport.created)
    .bind(sport.modified)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| StorageError::from(e).classify(MESSAGE_DUPLICATE_TITLE, MESSAGE_UNKNOWN_COMPETITION))?
    .ok_or(StorageError::NotFound)
}

async fn replace_competitions(
    conn: &mut PgConnection,
    sport_id: Uuid,
    competitions: &[Uuid],
) -> Result<()> {
    sqlx::query(
        "DELETE FROM competition_sport WHERE sport_id = $1 AND NOT (competition_id = ANY($2))",
    )
    .bind(sport_id)
    .bind(competitions)
    .execute(&mut *conn)
    .await?;

    let mut seen = sqlx::query_scalar::<_, Uuid>(
        "SELECT competition_id FROM competition_sport WHERE sport_id = $1",
    )
    .bind(sport_id)
    .fetch_all(&mut *conn)
    .await?;

    for &competition_id in competitions {
        if seen.contains(&competition_id) {
            continue;
        }
        competition_sport::insert(&mut *conn, &CompetitionSport::new(competition_id, sport_id))
            .await?;
        seen.push(competition_id);
    }

    Ok(())
}

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::rules::{CompetitionBounds, RuleResult, Timestamps, check_stage_date, check_timestamps};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Stage {
    pub id: Uuid,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub place: Option<String>,
    #[sqlx(rename = "competition_sport_id")]
    pub competition_sport: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Stage {
    pub fn new(
        title: impl Into<String>,
        date: Option<NaiveDate>,
        place: Option<String>,
        competition_sport: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            place,
            competition_sport,
            created: now,
            modified: now,
        }
    }

    /// `bounds` are the dates of the competition reached through
    /// `competition_sport`, or `None` if it has no competition.
    pub fn check(&self, bounds: Option<CompetitionBounds>) -> RuleResult {
        check_timestamps(self)?;
        check_stage_date(self.date, bounds)
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Timestamps for Stage {
    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        Some(self.modified)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

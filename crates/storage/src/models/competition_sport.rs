use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::rules::{RuleResult, Timestamps, check_timestamps};

/// Association between a competition and one of its sports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionSport {
    pub id: Uuid,
    #[sqlx(rename = "competition_id")]
    pub competition: Uuid,
    #[sqlx(rename = "sport_id")]
    pub sport: Uuid,
    pub created: DateTime<Utc>,
}

impl CompetitionSport {
    pub fn new(competition: Uuid, sport: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            competition,
            sport,
            created: Utc::now(),
        }
    }

    pub fn check(&self) -> RuleResult {
        check_timestamps(self)
    }
}

impl Timestamps for CompetitionSport {
    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl fmt::Display for CompetitionSport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Competition:{}\nSport:{}", self.competition, self.sport)
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Stage;

/// Payload for creating or replacing a stage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StageRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    pub date: Option<NaiveDate>,

    pub place: Option<String>,

    pub competition_sport: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StageResponse {
    pub id: Uuid,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub place: Option<String>,
    pub competition_sport: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl From<Stage> for StageResponse {
    fn from(stage: Stage) -> Self {
        Self {
            id: stage.id,
            title: stage.title,
            date: stage.date,
            place: stage.place,
            competition_sport: stage.competition_sport,
            created: stage.created,
            modified: stage.modified,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Sport;

/// Payload for creating or replacing a sport
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SportRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// Replaces the competitions this sport belongs to when present.
    #[serde(default)]
    pub competitions: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub competitions: Vec<Uuid>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl SportResponse {
    pub fn new(sport: Sport, competitions: Vec<Uuid>) -> Self {
        Self {
            id: sport.id,
            title: sport.title,
            description: sport.description,
            competitions,
            created: sport.created,
            modified: sport.modified,
        }
    }
}

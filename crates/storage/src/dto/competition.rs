use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Competition;
use crate::rules::{MESSAGE_COMPETITION_DATES_INCORRECT_ORDER, RuleResult, check_dates_order};

/// Payload for creating or replacing a competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_competition_dates", skip_on_field_errors = false))]
pub struct CompetitionRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,

    pub date_of_start: Option<NaiveDate>,

    pub date_of_end: Option<NaiveDate>,

    /// Replaces the competition's sports when present.
    #[serde(default)]
    pub sports: Option<Vec<Uuid>>,
}

impl CompetitionRequest {
    /// Form-level check of the submitted date range.
    pub fn clean(&self) -> RuleResult {
        check_dates_order(
            self.date_of_start,
            self.date_of_end,
            MESSAGE_COMPETITION_DATES_INCORRECT_ORDER,
        )
    }
}

fn validate_competition_dates(
    req: &CompetitionRequest,
) -> Result<(), validator::ValidationError> {
    req.clean().map_err(|e| {
        let mut error = validator::ValidationError::new("dates_order");
        error.message = Some(Cow::Owned(e.to_string()));
        error
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub id: Uuid,
    pub title: String,
    pub date_of_start: Option<NaiveDate>,
    pub date_of_end: Option<NaiveDate>,
    pub sports: Vec<Uuid>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl CompetitionResponse {
    pub fn new(competition: Competition, sports: Vec<Uuid>) -> Self {
        Self {
            id: competition.id,
            title: competition.title,
            date_of_start: competition.date_of_start,
            date_of_end: competition.date_of_end,
            sports,
            created: competition.created,
            modified: competition.modified,
        }
    }
}

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::rules::{
    MESSAGE_COMPETITION_DATES_INCORRECT_ORDER, RuleResult, Timestamps, check_dates_order,
    check_timestamps,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub id: Uuid,
    pub title: String,
    pub date_of_start: Option<NaiveDate>,
    pub date_of_end: Option<NaiveDate>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Competition {
    pub fn new(
        title: impl Into<String>,
        date_of_start: Option<NaiveDate>,
        date_of_end: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date_of_start,
            date_of_end,
            created: now,
            modified: now,
        }
    }

    /// Rules every create and save must satisfy.
    pub fn check(&self) -> RuleResult {
        check_timestamps(self)?;
        check_dates_order(
            self.date_of_start,
            self.date_of_end,
            MESSAGE_COMPETITION_DATES_INCORRECT_ORDER,
        )
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Timestamps for Competition {
    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        Some(self.modified)
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

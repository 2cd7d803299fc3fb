use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::rules::{RuleResult, Timestamps, check_timestamps};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Sport {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Sport {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            created: now,
            modified: now,
        }
    }

    pub fn check(&self) -> RuleResult {
        check_timestamps(self)
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl Timestamps for Sport {
    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        Some(self.modified)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::User;
use crate::rules::{RuleResult, Timestamps, check_timestamps};

/// Profile of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: Uuid,
    pub user: User,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Client {
    pub fn new(user: User) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user,
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

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn first_name(&self) -> &str {
        &self.user.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.user.last_name
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}

impl Timestamps for Client {
    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        Some(self.modified)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.username(),
            self.first_name(),
            self.last_name()
        )
    }
}

use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::auth::{SessionService, SharedDirectory};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionService,
    pub users: SharedDirectory,
}

impl AppState {
    /// Sessions resolve their users through `db`
    pub fn new(db: Database, sessions: SessionService) -> Self {
        Self {
            users: Arc::new(db.clone()),
            db,
            sessions,
        }
    }

    pub fn with_users(mut self, users: SharedDirectory) -> Self {
        self.users = users;
        self
    }
}

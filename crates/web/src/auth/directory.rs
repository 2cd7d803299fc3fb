use std::sync::Arc;

use axum::async_trait;
use storage::{
    Database,
    error::{Result, StorageError},
    models::User,
    repository::client::ClientRepository,
};
use uuid::Uuid;

/// Where sessions look up the current state of their user
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
}

pub type SharedDirectory = Arc<dyn UserDirectory>;

#[async_trait]
impl UserDirectory for Database {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        match ClientRepository::new(self.pool()).find_user_by_id(id).await {
            Ok(user) => Ok(Some(user)),
            Err(StorageError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

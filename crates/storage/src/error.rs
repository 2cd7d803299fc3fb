use thiserror::Error;

use crate::rules::ValidationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// Turns unique and foreign-key violations into their typed variants,
    /// using `unique` and `reference` as the client-facing messages.
    pub fn classify(self, unique: &str, reference: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(unique.to_string())
        } else if self.is_foreign_key_violation() {
            StorageError::InvalidReference(reference.to_string())
        } else {
            self
        }
    }
}

use crate::error::WebError;

pub fn hash_password(password: &str) -> Result<String, WebError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| WebError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

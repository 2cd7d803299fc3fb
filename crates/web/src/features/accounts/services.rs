use sqlx::PgPool;
use storage::{
    dto::account::RegistrationForm,
    error::StorageError,
    models::{Client, User},
    repository::client::{ClientRepository, MESSAGE_DUPLICATE_USERNAME, NewUser},
};
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{WebError, validation_messages};

pub const MESSAGE_INVALID_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Looks the user up and checks the password; `None` on any mismatch
pub async fn authenticate(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<Option<User>, WebError> {
    let user = match ClientRepository::new(pool)
        .find_user_by_username(username)
        .await
    {
        Ok(user) => user,
        Err(StorageError::NotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if verify_password(password, &user.password_hash) {
        Ok(Some(user))
    } else {
        tracing::debug!(username, "Password mismatch");
        Ok(None)
    }
}

/// Outcome of a registration attempt the form can display
pub enum Registration {
    Created(Client),
    Rejected(Vec<String>),
}

pub async fn register(pool: &PgPool, form: &RegistrationForm) -> Result<Registration, WebError> {
    if let Err(errors) = form.validate() {
        let messages = validation_messages(&errors)
            .into_iter()
            .map(|(_, message)| message)
            .collect();
        return Ok(Registration::Rejected(messages));
    }

    let repo = ClientRepository::new(pool);
    if repo.username_exists(&form.username).await? {
        return Ok(Registration::Rejected(vec![
            MESSAGE_DUPLICATE_USERNAME.to_string(),
        ]));
    }

    let new_user = NewUser {
        username: form.username.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        password_hash: hash_password(&form.password1)?,
        is_superuser: false,
    };

    match repo.register(new_user).await {
        Ok(client) => Ok(Registration::Created(client)),
        Err(StorageError::ConstraintViolation(message)) => {
            Ok(Registration::Rejected(vec![message]))
        }
        Err(e) => Err(e.into()),
    }
}

/// Only same-site paths are followed after login
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/profile/",
    }
}

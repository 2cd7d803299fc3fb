use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const COMMON_PASSWORDS: &[&str] = &[
    "12345678", "123456789", "1234567890", "abcdef123", "password", "password1",
    "password123", "qwertyuiop", "qwerty123", "iloveyou", "11111111", "00000000",
    "abc12345", "letmein1", "sunshine", "princess", "football", "baseball",
    "welcome1", "admin123", "passw0rd", "trustno1", "superman", "whatever",
];

/// Sign-up form for a new user and its client profile
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords", skip_on_field_errors = false))]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 150, message = "Username must be between 1 and 150 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "This field is required."))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "This field is required."))]
    pub last_name: String,

    #[validate(length(max = 100))]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    pub password1: String,

    pub password2: String,
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));

    if valid {
        Ok(())
    } else {
        Err(with_message(
            "invalid_username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ))
    }
}

fn validate_passwords(form: &RegistrationForm) -> Result<(), ValidationError> {
    if form.password1 != form.password2 {
        return Err(with_message(
            "password_mismatch",
            "The two password fields didn't match.",
        ));
    }
    check_password_strength(&form.password1, &form.username)
}

/// Minimum length, not purely numeric, not a common password and not a
/// copy of the username.
pub fn check_password_strength(password: &str, username: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(with_message(
            "password_too_short",
            "This password is too short. It must contain at least 8 characters.",
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(with_message(
            "password_entirely_numeric",
            "This password is entirely numeric.",
        ));
    }
    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return Err(with_message("password_too_common", "This password is too common."));
    }
    let username = username.to_lowercase();
    if username.len() >= 3 && lowered.contains(&username) {
        return Err(with_message(
            "password_too_similar",
            "The password is too similar to the username.",
        ));
    }
    Ok(())
}

/// Browser login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Credentials exchanged for an API token
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

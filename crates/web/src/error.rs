use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use storage::error::StorageError;
use thiserror::Error;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// `field: message` pairs, schema-level errors without the field prefix.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                )
            })
        })
        .collect();
    messages.sort();
    messages
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_))
            | Self::Storage(StorageError::InvalidReference(_))
            | Self::Storage(StorageError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({ "detail": "Not found." })
            }
            Self::Storage(StorageError::ConstraintViolation(msg))
            | Self::Storage(StorageError::InvalidReference(msg)) => {
                json!({ "detail": msg })
            }
            Self::Storage(StorageError::Validation(e)) => {
                json!({ "detail": e.to_string() })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({ "detail": "An internal error occurred" })
            }
            Self::Validation(errors) => {
                let messages = validation_messages(errors);
                let detail = messages
                    .iter()
                    .map(|(field, message)| {
                        if field == "__all__" {
                            message.clone()
                        } else {
                            format!("{}: {}", field, message)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; ");

                let mut fields = Map::new();
                for (field, message) in messages {
                    let entry = fields
                        .entry(field)
                        .or_insert_with(|| Value::Array(Vec::new()));
                    if let Value::Array(list) = entry {
                        list.push(Value::String(message));
                    }
                }

                json!({
                    "detail": detail,
                    "errors": fields
                })
            }
            Self::BadRequest(msg) => {
                json!({ "detail": msg })
            }
            Self::Unauthorized => {
                json!({ "detail": "Authentication credentials were not provided." })
            }
            Self::Forbidden => {
                json!({ "detail": "You do not have permission to perform this action." })
            }
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({ "detail": "An internal error occurred" })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for WebError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, WebError>;

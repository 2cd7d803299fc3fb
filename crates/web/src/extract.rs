use axum::extract::FromRequest;

use crate::error::WebError;

/// JSON body whose rejections answer with the API error body (400)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WebError))]
pub struct ApiJson<T>(pub T);

/// Urlencoded form, rejected the same way as [`ApiJson`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(WebError))]
pub struct ApiForm<T>(pub T);

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{login, login_form, logout, obtain_token, profile, register, register_form};
use crate::state::AppState;

/// Token exchange; mounted outside the API permission layer
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/token", post(obtain_token))
        .route("/api/token/", post(obtain_token))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register/", get(register_form).post(register))
        .route("/accounts/login/", get(login_form).post(login))
        .route("/accounts/logout/", get(logout).post(logout))
        .route("/profile/", get(profile))
}

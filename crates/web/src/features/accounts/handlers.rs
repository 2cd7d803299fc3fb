use axum::{
    Json,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use storage::{
    Database,
    dto::account::{LoginForm, RegistrationForm, TokenRequest, TokenResponse},
    error::StorageError,
    repository::client::ClientRepository,
};
use validator::Validate;

use super::services::{self, MESSAGE_INVALID_CREDENTIALS, Registration};
use crate::auth::{
    SessionService,
    cookie::{build_clear_cookie, build_session_cookie},
};
use crate::error::{ApiResult, WebError};
use crate::extract::{ApiForm, ApiJson};
use crate::features::pages::templates::{self, RegistrationValues, SUPERUSER_PROFILE_MESSAGE};
use crate::middleware::auth::{RequireLogin, redirect_found};

fn with_cookie(mut response: Response, cookie: String) -> Result<Response, WebError> {
    response.headers_mut().insert(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| WebError::InternalServerError("Failed to build cookie header".to_string()))?,
    );
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/token/",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Bearer token for the API", body = TokenResponse),
        (status = 400, description = "Unable to log in with provided credentials")
    ),
    tag = "auth"
)]
pub async fn obtain_token(
    State(db): State<Database>,
    State(sessions): State<SessionService>,
    ApiJson(req): ApiJson<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let user = services::authenticate(db.pool(), &req.username, &req.password)
        .await?
        .ok_or_else(|| {
            WebError::BadRequest("Unable to log in with provided credentials.".to_string())
        })?;

    let token = sessions.issue(&user)?;
    tracing::info!(username = %user.username, "Issued API token");

    Ok(Json(TokenResponse { token }))
}

pub async fn register_form() -> Html<String> {
    Html(templates::register(&RegistrationValues::default(), &[], false))
}

pub async fn register(
    State(db): State<Database>,
    ApiForm(form): ApiForm<RegistrationForm>,
) -> Result<Html<String>, WebError> {
    let values = RegistrationValues {
        username: &form.username,
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
    };

    let page = match services::register(db.pool(), &form).await? {
        Registration::Created(_) => {
            templates::register(&RegistrationValues::default(), &[], true)
        }
        Registration::Rejected(errors) => templates::register(&values, &errors, false),
    };

    Ok(Html(page))
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(templates::login(query.next.as_deref().unwrap_or(""), None))
}

pub async fn login(
    State(db): State<Database>,
    State(sessions): State<SessionService>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Response, WebError> {
    let next = form.next.as_deref().unwrap_or("");

    let Some(user) = services::authenticate(db.pool(), &form.username, &form.password).await?
    else {
        return Ok(Html(templates::login(next, Some(MESSAGE_INVALID_CREDENTIALS))).into_response());
    };

    let token = sessions.issue(&user)?;
    let cookie = build_session_cookie(&token, sessions.ttl_seconds(), sessions.secure_cookies());
    tracing::info!(username = %user.username, "User logged in");

    with_cookie(redirect_found(services::safe_next(form.next.as_deref())), cookie)
}

pub async fn logout(State(sessions): State<SessionService>) -> Result<Response, WebError> {
    with_cookie(redirect_found("/"), build_clear_cookie(sessions.secure_cookies()))
}

pub async fn profile(
    State(db): State<Database>,
    RequireLogin(claims): RequireLogin,
) -> Result<Html<String>, WebError> {
    if claims.is_superuser {
        let pairs = [("٩(◕‿◕｡)۶", SUPERUSER_PROFILE_MESSAGE.to_string())];
        return Ok(Html(templates::profile(&pairs, Some(&claims.username))));
    }

    let pairs = match ClientRepository::new(db.pool())
        .find_by_user(claims.user_id()?)
        .await
    {
        Ok(client) => vec![
            ("username", client.username().to_string()),
            ("first_name", client.first_name().to_string()),
            ("last_name", client.last_name().to_string()),
            ("email", client.email().to_string()),
        ],
        // Accounts seeded without a profile
        Err(StorageError::NotFound) => vec![("username", claims.username.clone())],
        Err(e) => return Err(e.into()),
    };

    Ok(Html(templates::profile(&pairs, Some(&claims.username))))
}

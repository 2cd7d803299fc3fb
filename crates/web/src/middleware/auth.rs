use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, COOKIE, LOCATION},
        request::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{
    Claims, SessionService, SharedDirectory, UserDirectory, cookie::extract_session_token,
};
use crate::error::WebError;

pub const LOGIN_URL: &str = "/accounts/login/";

/// Outcome of the API permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Unauthenticated,
    Forbidden,
}

/// Safe methods need a session, writes need a superuser session, anything
/// else is refused.
pub fn api_access(method: &Method, session: Option<&Claims>) -> Access {
    let Some(claims) = session else {
        return Access::Unauthenticated;
    };

    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        return Access::Granted;
    }

    if matches!(*method, Method::POST | Method::PUT | Method::DELETE) && claims.is_superuser {
        return Access::Granted;
    }

    Access::Forbidden
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn cookie_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(extract_session_token)
}

/// Verifies `token` and refreshes the claims from the stored user, whose
/// role wins over the one signed into the token. Unknown users are anonymous.
pub async fn resolve_session(
    sessions: &SessionService,
    users: &dyn UserDirectory,
    token: &str,
) -> Result<Option<Claims>, WebError> {
    let Ok(claims) = sessions.verify(token) else {
        return Ok(None);
    };
    let Ok(user_id) = claims.user_id() else {
        return Ok(None);
    };

    let Some(user) = users.find_user(user_id).await? else {
        tracing::debug!(%user_id, "Session token for an unknown user");
        return Ok(None);
    };

    Ok(Some(Claims {
        username: user.username,
        is_superuser: user.is_superuser,
        ..claims
    }))
}

/// Resolves the bearer token or session cookie into [`Claims`] stored in
/// the request extensions. Invalid tokens leave the request anonymous.
pub async fn session_middleware(
    State(sessions): State<SessionService>,
    State(users): State<SharedDirectory>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(&request)
        .map(str::to_string)
        .or_else(|| cookie_token(&request));

    if let Some(token) = token
        && let Some(claims) = resolve_session(&sessions, users.as_ref(), &token).await?
    {
        request.extensions_mut().insert::<Claims>(claims);
    }

    Ok(next.run(request).await)
}

/// Applies [`api_access`] to every API route it wraps
pub async fn require_api_permission(request: Request, next: Next) -> Result<Response, WebError> {
    let access = api_access(request.method(), request.extensions().get::<Claims>());

    match access {
        Access::Granted => Ok(next.run(request).await),
        Access::Unauthenticated => {
            tracing::warn!(method = %request.method(), path = %request.uri().path(), "Unauthenticated API request");
            Err(WebError::Unauthorized)
        }
        Access::Forbidden => {
            tracing::warn!(method = %request.method(), path = %request.uri().path(), "API request without privileges");
            Err(WebError::Forbidden)
        }
    }
}

/// 302 Found, the status browsers get for login and lookup redirects
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

pub fn login_redirect(next: &str) -> Response {
    redirect_found(&format!("{}?next={}", LOGIN_URL, urlencoding::encode(next)))
}

/// Session of a logged-in user; anonymous requests are sent to the login page
#[derive(Debug, Clone)]
pub struct RequireLogin(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Claims>() {
            Some(claims) => Ok(Self(claims.clone())),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                Err(login_redirect(next))
            }
        }
    }
}

/// Session if there is one; never rejects
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Claims>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Forkful - Session middleware.
///
/// Verifies the signed session cookie and exposes the authenticated username
/// to handlers through typed extractors.
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::error::AppError;
use crate::AppState;

/// Cookie carrying the signed session token.
pub const SESSION_COOKIE_NAME: &str = "forkful_session";

/// Authenticated session context. The username is lowercased at login time.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
}

impl SessionUser {
    /// True iff the session belongs to `candidate`. Both sides are compared
    /// lowercased; stored usernames already are.
    pub fn is_current(&self, candidate: &str) -> bool {
        self.username == candidate.to_lowercase()
    }
}

/// Required-auth extractor for web pages.
/// Missing or invalid sessions reject with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct WebSessionUser(pub SessionUser);

impl std::ops::Deref for WebSessionUser {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for WebSessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(WebSessionUser)
            .ok_or(AppError::AuthRedirect)
    }
}

/// Optional extractor for pages that adapt to login state without
/// requiring it.
pub struct OptionalSessionUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalSessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<SessionUser>().cloned();
        Ok(OptionalSessionUser(user))
    }
}

/// Session middleware: verifies the session cookie and, on success, inserts
/// `SessionUser` into request extensions. Invalid or expired tokens are
/// ignored so public pages keep working; gated pages reject via
/// `WebSessionUser`.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_session_token(&jar) {
        match state.auth_service.verify_session_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(SessionUser {
                    username: claims.sub,
                });
            }
            Err(e) => {
                tracing::debug!("Session token verification failed (ignoring): {}", e);
            }
        }
    }

    Ok(next.run(request).await)
}

/// Extract the session token from the cookie jar.
fn extract_session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Build the session cookie set at login/registration.
pub fn build_session_cookie(token: String, lifetime_minutes: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(lifetime_minutes as i64))
        .build()
}

/// Build an expired session cookie, destroying the session at logout or
/// profile deletion.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}

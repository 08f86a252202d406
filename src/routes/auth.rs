use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::AppError,
    message::{LoginRequest, SessionResponse, UserProfile},
    state::SharedState,
};

use super::SESSION_COOKIE;

/// Shared-password sign-in. SSO sign-in is handled by an external identity
/// provider mounted under the same /api/auth prefix; this route only covers
/// the local credential.
pub async fn login_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let password = payload.password.as_deref().unwrap_or_default();
    if password.is_empty() || password != state.shared_password {
        return Err(AppError::Unauthorized);
    }

    let user = UserProfile {
        name: "Admin".to_string(),
        email: "admin@nesr.com".to_string(),
        job_title: "NESR Employee".to_string(),
    };
    let token = state.sessions.issue(user.clone()).await;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(SessionResponse { user })))
}

pub async fn logout_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await;
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), StatusCode::NO_CONTENT)
}

/// Identity behind the current cookie, for the signed-in UI header.
pub async fn session_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Json<SessionResponse>, AppError> {
    let token = jar.get(SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
    let user = state
        .sessions
        .validate(token.value())
        .await
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse { user }))
}

// src/routes/mod.rs
pub mod auth;
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use chat::{chat_handler, list_agents_handler};
use auth::{login_handler, logout_handler, session_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "gateway_session";

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/agents", get(list_agents_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/session", get(session_handler))
        .route("/health", get(|| async { "OK" }))
        .route_service("/login", ServeFile::new("public/login.html"))
        .fallback_service(ServeDir::new("public"))
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// Paths reachable without a session: the login page, the auth routes
// (including the callback prefix an external identity provider mounts),
// health probes, and static assets.
fn is_exempt(path: &str) -> bool {
    path == "/login"
        || path == "/health"
        || path == "/favicon.ico"
        || path.starts_with("/api/auth/")
        || path.starts_with("/assets/")
}

/// Two outcomes only: pass the request through unmodified, or redirect to
/// the login page.
async fn session_gate(
    State(state): State<SharedState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    if is_exempt(req.uri().path()) {
        return next.run(req).await;
    }

    let valid = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.validate(cookie.value()).await.is_some(),
        None => false,
    };

    if valid {
        next.run(req).await
    } else {
        Redirect::temporary("/login").into_response()
    }
}

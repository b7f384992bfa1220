use crate::{
    dto::CallbackQuery,
    error::{AppError, AppResult},
    state::AppState,
};
use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::{info, warn};
use wso2is_domain::{Session, SessionId};

pub const SESSION_COOKIE_NAME: &str = "wso2is_session";
pub const OAUTH_STATE_COOKIE_NAME: &str = "oauth_state";

fn cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = cookie(name, String::new(), secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

fn max_age(duration: std::time::Duration) -> Duration {
    Duration::seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
}

fn session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(|value| SessionId::from_string(value.to_string()))
}

/// Resolve the session cookie into an immutable [`Session`] for the handler
///
/// The stored record is refreshed and then re-scoped into the configured
/// organization; any failure rejects the request.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(request.headers());
    let id = session_id(&jar).ok_or(AppError::Unauthorized)?;
    let previous = state.sessions.get(&id).await.ok_or(AppError::Unauthorized)?;

    let record = state
        .session_shaping
        .materialize_token(Some(previous), None)?;
    let session = state.session_shaping.materialize_session(&record).await?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// `GET /auth/signin`: redirect to the identity server's authorize page
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let redirect = state.auth_service.begin_sign_in().await?;
    let secure = state.config.cookie_secure;

    let mut state_cookie = cookie(OAUTH_STATE_COOKIE_NAME, redirect.state, secure);
    state_cookie.set_max_age(max_age(state.config.app.auth.get_state_ttl()));

    let jar = jar.add(state_cookie);
    Ok((jar, Redirect::temporary(&redirect.url)).into_response())
}

/// `GET /auth/callback`: verify state, exchange the code, start a session
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> AppResult<Response> {
    if let Some(error) = params.error {
        warn!(
            "Sign-in rejected by identity server: {} {}",
            error,
            params.error_description.as_deref().unwrap_or_default()
        );
        return Err(AppError::Unauthorized);
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let expected_state = jar
        .get(OAUTH_STATE_COOKIE_NAME)
        .map(Cookie::value)
        .unwrap_or_default();
    if expected_state.is_empty() || params.state.as_deref() != Some(expected_state) {
        warn!("OAuth state mismatch on callback");
        return Err(AppError::Unauthorized);
    }

    let record = state.auth_service.complete_sign_in(&code).await?;
    let id = state.sessions.create(record).await;
    info!("Session started");

    let secure = state.config.cookie_secure;
    let mut session_cookie = cookie(SESSION_COOKIE_NAME, id.to_string(), secure);
    session_cookie.set_max_age(max_age(state.sessions.ttl()));

    let jar = jar
        .add(session_cookie)
        .add(expired_cookie(OAUTH_STATE_COOKIE_NAME, secure));
    Ok((jar, Redirect::temporary("/")).into_response())
}

/// `POST /auth/signout`: drop the session and clear its cookie
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(id) = session_id(&jar) {
        if state.sessions.remove(&id).await {
            info!("Session ended");
        }
    }

    let jar = jar.add(expired_cookie(SESSION_COOKIE_NAME, state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/session`: the current session's public tokens
pub async fn current_session(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}

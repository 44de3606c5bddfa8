use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "footprint_session";

/// Map the cookie (if any) to a live session. A new session gets a new cookie.
pub async fn resolve_session(state: &AppState, jar: CookieJar) -> (Uuid, CookieJar) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let (id, created) = state.sessions.resolve(existing).await;
    if !created {
        return (id, jar);
    }

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (id, jar.add(cookie))
}

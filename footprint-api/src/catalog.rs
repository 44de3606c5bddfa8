use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use footprint_catalog::CatalogCard;
use footprint_shared::Mode;
use crate::{error::AppError, session::resolve_session, state::AppState, storefront::session_cards};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub mode: Mode,
    pub cards: Vec<CatalogCard>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/catalog", get(list_catalog))
}

/// GET /api/catalog?mode=wholesale
/// Card view models for every product. Falls back to the session's mode.
async fn list_catalog(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CatalogQuery>,
) -> Result<(CookieJar, Json<CatalogResponse>), AppError> {
    let mode = query
        .mode
        .as_deref()
        .map(str::parse::<Mode>)
        .transpose()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (session_id, jar) = resolve_session(&state, jar).await;
    let (mode, cards) = session_cards(&state, session_id, mode).await?;

    Ok((jar, Json(CatalogResponse { mode, cards })))
}

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;
use footprint_catalog::render::render_storefront;
use footprint_catalog::{CatalogCard, ItemAction, ItemActionError, Notice, Product, SizeBuckets, StorefrontPage};
use footprint_shared::models::events::{BatchSubmittedEvent, ItemAddedEvent, ModeChangedEvent};
use footprint_shared::{Mode, StorefrontEvent};
use footprint_store::Session;
use crate::{error::AppError, session::resolve_session, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ModeForm {
    pub mode: String,
}

/// Raw matrix form: `size_<n>` -> quantity text. Other keys are ignored.
pub type QuantityForm = HashMap<String, String>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(storefront))
        .route("/mode", post(switch_mode))
        .route("/items/{id}/toggle", post(toggle_matrix))
        .route("/items/{id}/quantities", post(save_quantities))
        .route("/items/{id}/batch", post(submit_batch))
        .route("/items/{id}/cart", post(add_to_cart))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
async fn storefront(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let (session_id, jar) = resolve_session(&state, jar).await;
    render_page(&state, session_id, jar, StatusCode::OK, None).await
}

/// POST /mode
async fn switch_mode(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ModeForm>,
) -> Result<Response, AppError> {
    let mode: Mode = form
        .mode
        .parse()
        .map_err(|e: footprint_shared::ModeParseError| AppError::ValidationError(e.to_string()))?;

    let (session_id, jar) = resolve_session(&state, jar).await;
    let previous = state
        .sessions
        .update(session_id, |session, _| session.set_mode(mode))
        .await
        .ok_or_else(|| session_gone(session_id))?;

    if previous != mode {
        info!("Session {} switched mode {} -> {}", session_id, previous, mode);
        state.events.publish(StorefrontEvent::ModeChanged(ModeChangedEvent {
            session_id,
            from: previous,
            to: mode,
            timestamp: Utc::now().timestamp(),
        }));
    }

    Ok((jar, Redirect::to("/")).into_response())
}

/// POST /items/{id}/toggle
async fn toggle_matrix(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (session_id, jar) = resolve_session(&state, jar).await;
    let product = find_product(&state, product_id).await?;

    let outcome = apply(&state, session_id, |session, buckets| {
        ItemAction::ToggleMatrix.check(session.mode())?;
        Ok(session.item_mut(product.id, buckets).toggle())
    })
    .await;

    match outcome {
        Ok(expansion) => {
            debug!("Session {} item {} now {:?}", session_id, product.id, expansion);
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) => action_failed(&state, session_id, jar, err).await,
    }
}

/// POST /items/{id}/quantities
async fn save_quantities(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<Uuid>,
    Form(form): Form<QuantityForm>,
) -> Result<Response, AppError> {
    let (session_id, jar) = resolve_session(&state, jar).await;
    let product = find_product(&state, product_id).await?;

    let fields = match parse_size_fields(&form) {
        Ok(fields) => fields,
        Err(err) => return action_failed(&state, session_id, jar, err).await,
    };

    let outcome = apply(&state, session_id, |session, buckets| {
        ItemAction::UpdateQuantities.check(session.mode())?;
        session
            .item_mut(product.id, buckets)
            .update_quantities(fields.iter().map(|(size, raw)| (*size, raw.as_str())))
    })
    .await;

    match outcome {
        Ok(()) => Ok((jar, Redirect::to("/")).into_response()),
        Err(err) => action_failed(&state, session_id, jar, err).await,
    }
}

/// POST /items/{id}/batch
async fn submit_batch(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<Uuid>,
    Form(form): Form<QuantityForm>,
) -> Result<Response, AppError> {
    let (session_id, jar) = resolve_session(&state, jar).await;
    let product = find_product(&state, product_id).await?;
    let moq_pairs = state.pricing.moq_pairs();

    let fields = match parse_size_fields(&form) {
        Ok(fields) => fields,
        Err(err) => return action_failed(&state, session_id, jar, err).await,
    };

    let outcome = apply(&state, session_id, |session, buckets| {
        ItemAction::SubmitBatch.check(session.mode())?;
        let item = session.item_mut(product.id, buckets);
        item.update_quantities(fields.iter().map(|(size, raw)| (*size, raw.as_str())))?;
        item.submit_batch(product.id, moq_pairs)
    })
    .await;

    let batch = match outcome {
        Ok(batch) => batch,
        Err(err) => return action_failed(&state, session_id, jar, err).await,
    };

    info!(
        "Session {} submitted batch of {} pairs for {}",
        session_id, batch.total_pairs, product.name
    );
    state.events.publish(StorefrontEvent::BatchSubmitted(BatchSubmittedEvent {
        session_id,
        product_id: product.id,
        sizes: batch.lines.iter().map(|l| (l.size, l.quantity)).collect(),
        total_pairs: batch.total_pairs,
        below_moq: batch.below_moq,
        timestamp: Utc::now().timestamp(),
    }));

    let mut message = format!("Added {} pairs of {} to cart", batch.total_pairs, product.name);
    if batch.below_moq {
        message.push_str(&format!(" (below the minimum order of {} pairs)", moq_pairs));
    }
    render_page(&state, session_id, jar, StatusCode::OK, Some(Notice::success(message))).await
}

/// POST /items/{id}/cart
async fn add_to_cart(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (session_id, jar) = resolve_session(&state, jar).await;
    let product = find_product(&state, product_id).await?;

    let outcome = apply(&state, session_id, |session, _| {
        ItemAction::AddToCart.check(session.mode())
    })
    .await;

    if let Err(err) = outcome {
        return action_failed(&state, session_id, jar, err).await;
    }

    info!("Session {} added {} to cart", session_id, product.name);
    state.events.publish(StorefrontEvent::ItemAdded(ItemAddedEvent {
        session_id,
        product_id: product.id,
        unit_price: product.retail_price,
        timestamp: Utc::now().timestamp(),
    }));

    let notice = Notice::success(format!("Added {} to cart", product.name));
    render_page(&state, session_id, jar, StatusCode::OK, Some(notice)).await
}

// ============================================================================
// Helpers
// ============================================================================

/// Build every card for the session, under `mode` or the session's own mode
pub(crate) async fn session_cards(
    state: &AppState,
    session_id: Uuid,
    mode: Option<Mode>,
) -> Result<(Mode, Vec<CatalogCard>), AppError> {
    let products = state.products.list_products().await?;

    state
        .sessions
        .read(session_id, |session| {
            let mode = mode.unwrap_or_else(|| session.mode());
            let cards: Vec<CatalogCard> = products
                .iter()
                .map(|p| CatalogCard::build(p, mode, session.item(&p.id), &state.pricing))
                .collect();
            (mode, cards)
        })
        .await
        .ok_or_else(|| session_gone(session_id))
}

async fn render_page(
    state: &AppState,
    session_id: Uuid,
    jar: CookieJar,
    status: StatusCode,
    notice: Option<Notice>,
) -> Result<Response, AppError> {
    let (mode, cards) = session_cards(state, session_id, None).await?;
    let html = render_storefront(&StorefrontPage {
        title: &state.title,
        mode,
        cards: &cards,
        notice: notice.as_ref(),
    });
    Ok((status, jar, Html(html)).into_response())
}

/// Shopper mistakes re-render the page with a banner; server faults bubble up.
async fn action_failed(
    state: &AppState,
    session_id: Uuid,
    jar: CookieJar,
    err: AppError,
) -> Result<Response, AppError> {
    let status = err.status();
    if status.is_server_error() {
        return Err(err);
    }
    debug!("Session {} action rejected: {}", session_id, err.public_message());
    render_page(state, session_id, jar, status, Some(Notice::error(err.public_message()))).await
}

async fn apply<R>(
    state: &AppState,
    session_id: Uuid,
    f: impl FnOnce(&mut Session, &SizeBuckets) -> Result<R, ItemActionError>,
) -> Result<R, AppError> {
    state
        .sessions
        .update(session_id, f)
        .await
        .ok_or_else(|| session_gone(session_id))?
        .map_err(AppError::from_item_action)
}

async fn find_product(state: &AppState, product_id: Uuid) -> Result<Product, AppError> {
    state
        .products
        .get_product(product_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Product not found: {}", product_id)))
}

fn parse_size_fields(form: &QuantityForm) -> Result<Vec<(u8, String)>, AppError> {
    let mut fields = Vec::new();
    for (key, value) in form {
        let Some(size) = key.strip_prefix("size_") else {
            continue;
        };
        let size: u8 = size
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Unknown size field: {}", key)))?;
        fields.push((size, value.clone()));
    }
    fields.sort_by_key(|(size, _)| *size);
    Ok(fields)
}

fn session_gone(session_id: Uuid) -> AppError {
    AppError::InternalServerError(format!("Session {} disappeared mid-request", session_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_fields() {
        let mut form = QuantityForm::new();
        form.insert("size_8".to_string(), "12".to_string());
        form.insert("size_6".to_string(), "".to_string());
        form.insert("note".to_string(), "ignored".to_string());

        let fields = parse_size_fields(&form).unwrap();
        assert_eq!(fields, vec![(6, "".to_string()), (8, "12".to_string())]);
    }

    #[test]
    fn test_parse_size_fields_rejects_bad_key() {
        let mut form = QuantityForm::new();
        form.insert("size_large".to_string(), "1".to_string());
        assert!(matches!(parse_size_fields(&form), Err(AppError::ValidationError(_))));
    }
}

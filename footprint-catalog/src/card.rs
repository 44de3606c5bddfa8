use serde::Serialize;
use uuid::Uuid;
use footprint_shared::Mode;
use crate::pricing::{PriceDisplay, PricingEngine};
use crate::product::Product;
use crate::view::ItemViewState;

pub const ADD_TO_CART_LABEL: &str = "Add to Cart";
pub const BULK_ORDER_LABEL: &str = "Bulk Order";
pub const SUBMIT_BATCH_LABEL: &str = "Add Batch to Cart";

/// The single action affordance on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardAction {
    AddToCart,
    BulkOrder { expanded: bool },
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::AddToCart => ADD_TO_CART_LABEL,
            CardAction::BulkOrder { .. } => BULK_ORDER_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub size: u8,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixView {
    pub cells: Vec<MatrixCell>,
    pub total_pairs: u32,
    pub submit_label: &'static str,
}

/// Everything needed to draw one catalog item under one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCard {
    pub product_id: Uuid,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: PriceDisplay,
    pub action: CardAction,
    pub action_label: &'static str,
    pub matrix: Option<MatrixView>,
}

impl CatalogCard {
    /// `state` is the card's own view state, if the session has touched it.
    /// Retail cards ignore it entirely.
    pub fn build(
        product: &Product,
        mode: Mode,
        state: Option<&ItemViewState>,
        pricing: &PricingEngine,
    ) -> Self {
        let price = pricing.quote(product, mode);

        let (action, matrix) = match mode {
            Mode::Retail => (CardAction::AddToCart, None),
            Mode::Wholesale => {
                let expanded = state.map(|s| s.expansion().is_expanded()).unwrap_or(false);
                let matrix = state.filter(|_| expanded).map(|s| MatrixView {
                    cells: s
                        .matrix()
                        .entries()
                        .map(|(size, quantity)| MatrixCell { size, quantity })
                        .collect(),
                    total_pairs: s.matrix().total_pairs(),
                    submit_label: SUBMIT_BATCH_LABEL,
                });
                (CardAction::BulkOrder { expanded }, matrix)
            }
        };

        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price,
            action,
            action_label: action.label(),
            matrix,
        }
    }
}

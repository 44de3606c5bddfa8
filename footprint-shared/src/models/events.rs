use uuid::Uuid;
use crate::{Mode, Money};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ModeChangedEvent {
    pub session_id: Uuid,
    pub from: Mode,
    pub to: Mode,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ItemAddedEvent {
    pub session_id: Uuid,
    pub product_id: Uuid,
    pub unit_price: Money,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BatchSubmittedEvent {
    pub session_id: Uuid,
    pub product_id: Uuid,
    pub sizes: Vec<(u8, u32)>, // (size, pairs), zero lines dropped
    pub total_pairs: u32,
    pub below_moq: bool,
    pub timestamp: i64,
}

/// Everything the storefront reports to the event stream
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorefrontEvent {
    ModeChanged(ModeChangedEvent),
    ItemAdded(ItemAddedEvent),
    BatchSubmitted(BatchSubmittedEvent),
}

impl StorefrontEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            StorefrontEvent::ModeChanged(_) => "storefront.mode",
            StorefrontEvent::ItemAdded(_) => "storefront.cart",
            StorefrontEvent::BatchSubmitted(_) => "storefront.batch",
        }
    }

    pub fn session_id(&self) -> Uuid {
        match self {
            StorefrontEvent::ModeChanged(e) => e.session_id,
            StorefrontEvent::ItemAdded(e) => e.session_id,
            StorefrontEvent::BatchSubmitted(e) => e.session_id,
        }
    }
}

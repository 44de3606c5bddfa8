use serde::{Deserialize, Serialize};
use uuid::Uuid;
use footprint_shared::{Mode, Money};

/// Core product structure. Loaded once from the catalog source and never
/// mutated by the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Image URL or path relative to the static asset root
    pub image: String,
    #[serde(alias = "retailPrice")]
    pub retail_price: Money,
    #[serde(alias = "wholesalePrice")]
    pub wholesale_price: Money,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        image: impl Into<String>,
        retail_price: Money,
        wholesale_price: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            image: image.into(),
            retail_price,
            wholesale_price,
        }
    }

    /// The one price field that applies under `mode`
    pub fn price_for(&self, mode: Mode) -> Money {
        match mode {
            Mode::Retail => self.retail_price,
            Mode::Wholesale => self.wholesale_price,
        }
    }

    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::MissingField("name"));
        }
        if self.category.trim().is_empty() {
            return Err(ProductError::MissingField("category"));
        }
        if self.image.trim().is_empty() {
            return Err(ProductError::MissingField("image"));
        }
        Ok(())
    }
}

/// Product-related errors
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product is missing required field: {0}")]
    MissingField(&'static str),
}

use serde::{Deserialize, Serialize};
use footprint_shared::{money::DEFAULT_CURRENCY_SYMBOL, Mode, Money};
use crate::product::Product;

/// Display rules for prices and wholesale badges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingConfig {
    /// Minimum order quantity shown on wholesale cards, in pairs
    pub moq_pairs: u32,

    /// Prefix for every displayed amount
    pub currency_symbol: String,

    /// Footnote attached to wholesale prices
    pub tax_note: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            moq_pairs: 24,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            tax_note: "*Excl. GST".to_string(),
        }
    }
}

/// What a card shows in its price area for one mode
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PriceDisplay {
    pub mode: Mode,
    pub amount: Money,
    pub label: String,
    pub tax_note: Option<String>,
    pub moq_badge: Option<String>,
}

/// Picks the price field and the wholesale extras for a product
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn moq_pairs(&self) -> u32 {
        self.config.moq_pairs
    }

    pub fn moq_badge(&self) -> String {
        format!("MOQ: {} Pairs", self.config.moq_pairs)
    }

    /// Retail shows the plain retail price. Wholesale shows the wholesale
    /// price marked with `*`, the tax footnote and the MOQ badge.
    pub fn quote(&self, product: &Product, mode: Mode) -> PriceDisplay {
        let amount = product.price_for(mode);
        let formatted = amount.format_with(&self.config.currency_symbol);

        match mode {
            Mode::Retail => PriceDisplay {
                mode,
                amount,
                label: formatted,
                tax_note: None,
                moq_badge: None,
            },
            Mode::Wholesale => PriceDisplay {
                mode,
                amount,
                label: format!("{}*", formatted),
                tax_note: Some(self.config.tax_note.clone()),
                moq_badge: Some(self.moq_badge()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oxford() -> Product {
        Product::new("Classic Oxford", "Formal", "/img/oxford.jpg", Money::new(1200), Money::new(800))
    }

    #[test]
    fn test_retail_quote() {
        let engine = PricingEngine::default();
        let display = engine.quote(&oxford(), Mode::Retail);

        assert_eq!(display.label, "₹1200");
        assert_eq!(display.amount, Money::new(1200));
        assert!(display.tax_note.is_none());
        assert!(display.moq_badge.is_none());
    }

    #[test]
    fn test_wholesale_quote() {
        let engine = PricingEngine::default();
        let display = engine.quote(&oxford(), Mode::Wholesale);

        assert_eq!(display.label, "₹800*");
        assert_eq!(display.tax_note.as_deref(), Some("*Excl. GST"));
        assert_eq!(display.moq_badge.as_deref(), Some("MOQ: 24 Pairs"));
    }

    #[test]
    fn test_custom_moq_and_symbol() {
        let engine = PricingEngine::new(PricingConfig {
            moq_pairs: 12,
            currency_symbol: "Rs.".to_string(),
            ..PricingConfig::default()
        });
        let display = engine.quote(&oxford(), Mode::Wholesale);

        assert_eq!(display.label, "Rs.800*");
        assert_eq!(display.moq_badge.as_deref(), Some("MOQ: 12 Pairs"));
    }
}

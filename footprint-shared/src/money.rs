use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Whole-rupee amount. Catalog prices carry no paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u32);

impl Money {
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> u32 {
        self.0
    }

    /// Format with a custom currency symbol, e.g. `Rs.1200`
    pub fn format_with(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DEFAULT_CURRENCY_SYMBOL, self.0)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_rupee_symbol() {
        assert_eq!(Money::new(1200).to_string(), "₹1200");
        assert_eq!(Money::new(0).to_string(), "₹0");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::new(800).format_with("INR "), "INR 800");
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Money::new(800)).unwrap(), "800");
        let money: Money = serde_json::from_str("1200").unwrap();
        assert_eq!(money.amount(), 1200);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Upper bound for a single size line in one batch
pub const MAX_PAIRS_PER_SIZE: u32 = 9999;

/// Fixed, ordered set of shoe sizes offered in the wholesale matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct SizeBuckets(Vec<u8>);

impl SizeBuckets {
    pub fn new(mut sizes: Vec<u8>) -> Self {
        sizes.sort_unstable();
        sizes.dedup();
        Self(sizes)
    }

    pub fn sizes(&self) -> &[u8] {
        &self.0
    }

    pub fn contains(&self, size: u8) -> bool {
        self.0.binary_search(&size).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SizeBuckets {
    fn default() -> Self {
        Self((6..=9).collect())
    }
}

impl From<Vec<u8>> for SizeBuckets {
    fn from(sizes: Vec<u8>) -> Self {
        Self::new(sizes)
    }
}

impl From<SizeBuckets> for Vec<u8> {
    fn from(buckets: SizeBuckets) -> Self {
        buckets.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("Quantity cannot be negative: {0}")]
    Negative(String),

    #[error("Quantity is not a whole number: {0}")]
    NotANumber(String),

    #[error("Quantity {value} exceeds the limit of {max} pairs per size")]
    TooLarge {
        value: String,
        max: u32,
    },

    #[error("Size {0} is not offered")]
    UnknownSize(u8),
}

/// Parse one quantity field. Blank input counts as zero.
pub fn parse_quantity(text: &str) -> Result<u32, QuantityError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    let all_digits = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());

    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => Err(QuantityError::Negative(trimmed.to_string())),
        Ok(n) if n > MAX_PAIRS_PER_SIZE as i64 => Err(QuantityError::TooLarge {
            value: trimmed.to_string(),
            max: MAX_PAIRS_PER_SIZE,
        }),
        Ok(n) => Ok(n as u32),
        // Digits that overflow i64 are still numbers, just absurd ones
        Err(_) if all_digits => {
            if trimmed.starts_with('-') {
                Err(QuantityError::Negative(trimmed.to_string()))
            } else {
                Err(QuantityError::TooLarge {
                    value: trimmed.to_string(),
                    max: MAX_PAIRS_PER_SIZE,
                })
            }
        }
        Err(_) => Err(QuantityError::NotANumber(trimmed.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLine {
    pub size: u8,
    pub quantity: u32,
}

/// Aggregated result of "Add Batch to Cart"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub product_id: Uuid,
    pub lines: Vec<BatchLine>,
    pub total_pairs: u32,
    pub below_moq: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("Batch has no pairs; enter a quantity for at least one size")]
    Empty,
}

/// Per-size quantity entry for one catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeMatrix {
    entries: BTreeMap<u8, u32>,
}

impl SizeMatrix {
    /// Every bucket starts at zero
    pub fn new(buckets: &SizeBuckets) -> Self {
        Self {
            entries: buckets.sizes().iter().map(|&size| (size, 0)).collect(),
        }
    }

    pub fn quantity(&self, size: u8) -> Option<u32> {
        self.entries.get(&size).copied()
    }

    /// `(size, quantity)` in ascending size order
    pub fn entries(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.entries.iter().map(|(&size, &qty)| (size, qty))
    }

    pub fn set(&mut self, size: u8, quantity: u32) -> Result<(), QuantityError> {
        if quantity > MAX_PAIRS_PER_SIZE {
            return Err(QuantityError::TooLarge {
                value: quantity.to_string(),
                max: MAX_PAIRS_PER_SIZE,
            });
        }
        let slot = self.entries.get_mut(&size).ok_or(QuantityError::UnknownSize(size))?;
        *slot = quantity;
        Ok(())
    }

    /// Validate every raw field first, then apply them together. A single bad
    /// field leaves the matrix untouched.
    pub fn apply_raw<'a, I>(&mut self, fields: I) -> Result<(), QuantityError>
    where
        I: IntoIterator<Item = (u8, &'a str)>,
    {
        let mut parsed = Vec::new();
        for (size, raw) in fields {
            if !self.entries.contains_key(&size) {
                return Err(QuantityError::UnknownSize(size));
            }
            parsed.push((size, parse_quantity(raw)?));
        }

        for (size, quantity) in parsed {
            self.entries.insert(size, quantity);
        }
        Ok(())
    }

    pub fn total_pairs(&self) -> u32 {
        self.entries.values().sum()
    }

    pub fn reset(&mut self) {
        self.entries.values_mut().for_each(|qty| *qty = 0);
    }

    /// Collect the non-zero lines into a batch request
    pub fn submit(&self, product_id: Uuid, moq_pairs: u32) -> Result<BatchRequest, BatchError> {
        let lines: Vec<BatchLine> = self
            .entries()
            .filter(|&(_, quantity)| quantity > 0)
            .map(|(size, quantity)| BatchLine { size, quantity })
            .collect();

        if lines.is_empty() {
            return Err(BatchError::Empty);
        }

        let total_pairs = lines.iter().map(|l| l.quantity).sum();
        Ok(BatchRequest {
            product_id,
            lines,
            total_pairs,
            below_moq: total_pairs < moq_pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_buckets_start_at_zero() {
        let matrix = SizeMatrix::new(&SizeBuckets::default());
        let entries: Vec<_> = matrix.entries().collect();
        assert_eq!(entries, vec![(6, 0), (7, 0), (8, 0), (9, 0)]);
        assert_eq!(matrix.total_pairs(), 0);
    }

    #[test]
    fn test_buckets_sorted_and_deduped() {
        let buckets = SizeBuckets::new(vec![9, 7, 7, 10]);
        assert_eq!(buckets.sizes(), &[7, 9, 10]);
        assert!(buckets.contains(10));
        assert!(!buckets.contains(8));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12"), Ok(12));
        assert_eq!(parse_quantity("  "), Ok(0));
        assert_eq!(parse_quantity("+3"), Ok(3));
        assert!(matches!(parse_quantity("-1"), Err(QuantityError::Negative(_))));
        assert!(matches!(parse_quantity("two"), Err(QuantityError::NotANumber(_))));
        assert!(matches!(parse_quantity("1.5"), Err(QuantityError::NotANumber(_))));
        assert!(matches!(parse_quantity("10000"), Err(QuantityError::TooLarge { .. })));
        assert!(matches!(
            parse_quantity("99999999999999999999999"),
            Err(QuantityError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_apply_raw_is_all_or_nothing() {
        let mut matrix = SizeMatrix::new(&SizeBuckets::default());
        matrix.apply_raw([(6, "4"), (7, "8")]).unwrap();
        assert_eq!(matrix.total_pairs(), 12);

        let result = matrix.apply_raw([(6, "10"), (8, "-2")]);
        assert!(matches!(result, Err(QuantityError::Negative(_))));
        assert_eq!(matrix.quantity(6), Some(4));

        let result = matrix.apply_raw([(11, "1")]);
        assert_eq!(result, Err(QuantityError::UnknownSize(11)));
    }

    #[test]
    fn test_submit_drops_zero_lines() {
        let mut matrix = SizeMatrix::new(&SizeBuckets::default());
        matrix.set(7, 12).unwrap();
        matrix.set(9, 12).unwrap();

        let product_id = Uuid::new_v4();
        let batch = matrix.submit(product_id, 24).unwrap();

        assert_eq!(batch.product_id, product_id);
        assert_eq!(batch.lines, vec![
            BatchLine { size: 7, quantity: 12 },
            BatchLine { size: 9, quantity: 12 },
        ]);
        assert_eq!(batch.total_pairs, 24);
        assert!(!batch.below_moq);
    }

    #[test]
    fn test_submit_flags_below_moq_and_rejects_empty() {
        let mut matrix = SizeMatrix::new(&SizeBuckets::default());
        assert_eq!(matrix.submit(Uuid::new_v4(), 24), Err(BatchError::Empty));

        matrix.set(8, 6).unwrap();
        let batch = matrix.submit(Uuid::new_v4(), 24).unwrap();
        assert!(batch.below_moq);

        matrix.reset();
        assert_eq!(matrix.total_pairs(), 0);
    }
}

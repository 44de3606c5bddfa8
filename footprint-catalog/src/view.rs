use serde::Serialize;
use uuid::Uuid;
use footprint_shared::Mode;
use crate::sizes::{BatchError, BatchRequest, QuantityError, SizeBuckets, SizeMatrix};

/// Visibility of the wholesale size matrix on one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded,
}

impl Expansion {
    pub fn toggled(&self) -> Expansion {
        match self {
            Expansion::Collapsed => Expansion::Expanded,
            Expansion::Expanded => Expansion::Collapsed,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, Expansion::Expanded)
    }
}

/// Things a shopper can do to a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    AddToCart,
    ToggleMatrix,
    UpdateQuantities,
    SubmitBatch,
}

impl ItemAction {
    pub fn required_mode(&self) -> Mode {
        match self {
            ItemAction::AddToCart => Mode::Retail,
            ItemAction::ToggleMatrix | ItemAction::UpdateQuantities | ItemAction::SubmitBatch => {
                Mode::Wholesale
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemAction::AddToCart => "add to cart",
            ItemAction::ToggleMatrix => "bulk order",
            ItemAction::UpdateQuantities => "update quantities",
            ItemAction::SubmitBatch => "add batch to cart",
        }
    }

    /// Each affordance exists under exactly one mode
    pub fn check(&self, mode: Mode) -> Result<(), ItemActionError> {
        if mode == self.required_mode() {
            Ok(())
        } else {
            Err(ItemActionError::ModeMismatch {
                action: self.name(),
                mode,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemActionError {
    #[error("Action '{action}' is not available in {mode} mode")]
    ModeMismatch {
        action: &'static str,
        mode: Mode,
    },

    #[error("Open the size matrix before submitting a batch")]
    MatrixHidden,

    #[error(transparent)]
    Quantity(#[from] QuantityError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// View state one card owns within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemViewState {
    expansion: Expansion,
    matrix: SizeMatrix,
}

impl ItemViewState {
    pub fn new(buckets: &SizeBuckets) -> Self {
        Self {
            expansion: Expansion::Collapsed,
            matrix: SizeMatrix::new(buckets),
        }
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    pub fn matrix(&self) -> &SizeMatrix {
        &self.matrix
    }

    /// Flip the matrix. Collapsing discards whatever was entered.
    pub fn toggle(&mut self) -> Expansion {
        self.expansion = self.expansion.toggled();
        if !self.expansion.is_expanded() {
            self.matrix.reset();
        }
        self.expansion
    }

    pub fn update_quantities<'a, I>(&mut self, fields: I) -> Result<(), ItemActionError>
    where
        I: IntoIterator<Item = (u8, &'a str)>,
    {
        if !self.expansion.is_expanded() {
            return Err(ItemActionError::MatrixHidden);
        }
        self.matrix.apply_raw(fields)?;
        Ok(())
    }

    /// On success the entries are discarded and the card collapses
    pub fn submit_batch(&mut self, product_id: Uuid, moq_pairs: u32) -> Result<BatchRequest, ItemActionError> {
        if !self.expansion.is_expanded() {
            return Err(ItemActionError::MatrixHidden);
        }
        let batch = self.matrix.submit(product_id, moq_pairs)?;
        self.matrix.reset();
        self.expansion = Expansion::Collapsed;
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pair_returns_to_collapsed() {
        let mut state = ItemViewState::new(&SizeBuckets::default());
        assert_eq!(state.expansion(), Expansion::Collapsed);

        assert_eq!(state.toggle(), Expansion::Expanded);
        assert_eq!(state.toggle(), Expansion::Collapsed);

        // No terminal state
        assert_eq!(state.toggle(), Expansion::Expanded);
    }

    #[test]
    fn test_collapse_discards_entries() {
        let mut state = ItemViewState::new(&SizeBuckets::default());
        state.toggle();
        state.update_quantities([(6, "5")]).unwrap();
        assert_eq!(state.matrix().total_pairs(), 5);

        state.toggle();
        state.toggle();
        assert_eq!(state.matrix().total_pairs(), 0);
    }

    #[test]
    fn test_quantities_require_open_matrix() {
        let mut state = ItemViewState::new(&SizeBuckets::default());
        let result = state.update_quantities([(6, "5")]);
        assert_eq!(result, Err(ItemActionError::MatrixHidden));
    }

    #[test]
    fn test_submit_batch_resets_item() {
        let mut state = ItemViewState::new(&SizeBuckets::default());
        state.toggle();
        state.update_quantities([(7, "12"), (8, "12")]).unwrap();

        let batch = state.submit_batch(Uuid::new_v4(), 24).unwrap();
        assert_eq!(batch.total_pairs, 24);
        assert_eq!(state.expansion(), Expansion::Collapsed);
        assert_eq!(state.matrix().total_pairs(), 0);
    }

    #[test]
    fn test_empty_batch_keeps_matrix_open() {
        let mut state = ItemViewState::new(&SizeBuckets::default());
        state.toggle();

        let result = state.submit_batch(Uuid::new_v4(), 24);
        assert_eq!(result, Err(ItemActionError::Batch(BatchError::Empty)));
        assert!(state.expansion().is_expanded());
    }

    #[test]
    fn test_action_mode_check() {
        assert!(ItemAction::AddToCart.check(Mode::Retail).is_ok());
        assert!(ItemAction::AddToCart.check(Mode::Wholesale).is_err());
        assert!(ItemAction::ToggleMatrix.check(Mode::Wholesale).is_ok());
        assert!(matches!(
            ItemAction::SubmitBatch.check(Mode::Retail),
            Err(ItemActionError::ModeMismatch { mode: Mode::Retail, .. })
        ));
    }
}

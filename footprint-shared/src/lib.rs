pub mod mode;
pub mod money;
pub mod models;

pub use mode::{Mode, ModeController, ModeParseError};
pub use money::Money;
pub use models::StorefrontEvent;

pub mod events;

pub use events::StorefrontEvent;

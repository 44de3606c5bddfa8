pub mod app_config;
pub mod catalog_repo;
pub mod session_repo;
pub mod events;

pub use catalog_repo::{InMemoryProductRepository, ProductRepository, RepositoryError};
pub use session_repo::{Session, SessionStore};
pub use events::EventPublisher;

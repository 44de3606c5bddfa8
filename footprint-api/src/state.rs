use std::sync::Arc;
use footprint_catalog::PricingEngine;
use footprint_store::app_config::StorefrontConfig;
use footprint_store::{EventPublisher, ProductRepository, SessionStore};

const EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub sessions: Arc<SessionStore>,
    pub events: EventPublisher,
    pub pricing: Arc<PricingEngine>,
    pub title: Arc<str>,
}

impl AppState {
    pub fn new(storefront: &StorefrontConfig, products: Arc<dyn ProductRepository>) -> Self {
        Self {
            products,
            sessions: Arc::new(SessionStore::new(
                storefront.default_mode,
                storefront.size_buckets.clone(),
                storefront.session_idle(),
            )),
            events: EventPublisher::new(EVENT_CHANNEL_CAPACITY),
            pricing: Arc::new(PricingEngine::new(storefront.pricing())),
            title: Arc::from(storefront.title.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_store::InMemoryProductRepository;

    #[test]
    fn test_oversized_session_idle_is_capped() {
        let storefront = StorefrontConfig {
            session_idle_minutes: u64::MAX,
            ..StorefrontConfig::default()
        };
        let state = AppState::new(&storefront, Arc::new(InMemoryProductRepository::seeded()));
        assert_eq!(state.title.as_ref(), "Footprint Shoes");
    }
}

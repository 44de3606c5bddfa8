use tokio::sync::broadcast;
use tracing::{info, warn};
use footprint_shared::StorefrontEvent;

/// Fan-out for storefront events. Every event is logged; live subscribers
/// also receive it over the broadcast channel.
#[derive(Clone)]
pub struct EventPublisher {
    tx: broadcast::Sender<StorefrontEvent>,
}

impl EventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StorefrontEvent) {
        let topic = event.topic();
        let key = event.session_id();

        match serde_json::to_string(&event) {
            Ok(payload) => info!("Event {}/{}: {}", topic, key, payload),
            Err(e) => warn!("Failed to serialize event for {}: {}", topic, e),
        }

        // No subscribers is fine
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_shared::models::events::ModeChangedEvent;
    use footprint_shared::Mode;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let publisher = EventPublisher::new(8);
        let mut rx = publisher.subscribe();

        let event = StorefrontEvent::ModeChanged(ModeChangedEvent {
            session_id: Uuid::new_v4(),
            from: Mode::Retail,
            to: Mode::Wholesale,
            timestamp: 0,
        });
        publisher.publish(event.clone());

        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let publisher = EventPublisher::new(8);
        publisher.publish(StorefrontEvent::ModeChanged(ModeChangedEvent {
            session_id: Uuid::nil(),
            from: Mode::Wholesale,
            to: Mode::Retail,
            timestamp: 0,
        }));
    }
}

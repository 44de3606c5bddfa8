use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use footprint_catalog::{ItemViewState, SizeBuckets};
use footprint_shared::{Mode, ModeController};
use tracing::{debug, info};

/// In-memory state of one shopper
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    mode: ModeController,
    items: HashMap<Uuid, ItemViewState>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid, default_mode: Mode) -> Self {
        let now = Utc::now();
        Self {
            id,
            mode: ModeController::new(default_mode),
            items: HashMap::new(),
            last_seen: now,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Switch mode and return the previous one. Any actual change drops all
    /// item view state so no wholesale matrix survives into retail.
    pub fn set_mode(&mut self, new_mode: Mode) -> Mode {
        let previous = self.mode.set_mode(new_mode);
        if previous != new_mode {
            self.items.clear();
        }
        previous
    }

    pub fn item(&self, product_id: &Uuid) -> Option<&ItemViewState> {
        self.items.get(product_id)
    }

    pub fn item_mut(&mut self, product_id: Uuid, buckets: &SizeBuckets) -> &mut ItemViewState {
        self.items
            .entry(product_id)
            .or_insert_with(|| ItemViewState::new(buckets))
    }

    pub fn touched_items(&self) -> usize {
        self.items.len()
    }
}

/// All live sessions, keyed by the session cookie
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    default_mode: Mode,
    buckets: SizeBuckets,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(default_mode: Mode, buckets: SizeBuckets, idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_mode,
            buckets,
            idle_timeout,
        }
    }

    /// Return a live session id, creating a fresh session when `id` is
    /// missing or unknown. The bool is true for a new session.
    pub async fn resolve(&self, id: Option<Uuid>) -> (Uuid, bool) {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        if let Some(session) = id.and_then(|id| sessions.get_mut(&id)) {
            session.last_seen = now;
            return (session.id, false);
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::new(id, self.default_mode));
        debug!("Session created: {}", id);
        (id, true)
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Option<R> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).map(f)
    }

    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut Session, &SizeBuckets) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(|session| {
            session.last_seen = Utc::now();
            f(session, &self.buckets)
        })
    }

    /// Drop sessions idle longer than the timeout
    pub async fn purge_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();
        sessions.retain(|_, s| now - s.last_seen < self.idle_timeout);

        let removed = initial_count - sessions.len();
        if removed > 0 {
            info!("Purged {} idle sessions", removed);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Mode::Retail, SizeBuckets::default(), Duration::minutes(30))
    }

    #[test]
    fn test_mode_switch_clears_items() {
        let mut session = Session::new(Uuid::new_v4(), Mode::Wholesale);
        let product_id = Uuid::new_v4();
        session.item_mut(product_id, &SizeBuckets::default()).toggle();
        assert_eq!(session.touched_items(), 1);

        // Same mode keeps state
        session.set_mode(Mode::Wholesale);
        assert_eq!(session.touched_items(), 1);

        assert_eq!(session.set_mode(Mode::Retail), Mode::Wholesale);
        assert_eq!(session.touched_items(), 0);
        assert!(session.item(&product_id).is_none());
    }

    #[tokio::test]
    async fn test_resolve_creates_and_reuses() {
        let store = store();

        let (id, created) = store.resolve(None).await;
        assert!(created);

        let (same, created) = store.resolve(Some(id)).await;
        assert_eq!(same, id);
        assert!(!created);

        // Unknown ids get a fresh session
        let (other, created) = store.resolve(Some(Uuid::new_v4())).await;
        assert_ne!(other, id);
        assert!(created);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_and_read() {
        let store = store();
        let (id, _) = store.resolve(None).await;

        let previous = store.update(id, |s, _| s.set_mode(Mode::Wholesale)).await;
        assert_eq!(previous, Some(Mode::Retail));
        assert_eq!(store.read(id, |s| s.mode()).await, Some(Mode::Wholesale));
        assert!(store.read(Uuid::new_v4(), |s| s.mode()).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_idle() {
        let store = store();
        let (id, _) = store.resolve(None).await;

        assert_eq!(store.purge_idle(Utc::now()).await, 0);
        assert_eq!(store.purge_idle(Utc::now() + Duration::minutes(31)).await, 1);
        assert!(store.read(id, |_| ()).await.is_none());
    }
}

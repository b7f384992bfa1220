use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use wso2is_domain::{SessionId, TokenRecord};

struct StoredRecord {
    record: TokenRecord,
    /// `None` when the lifetime reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl StoredRecord {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

/// In-memory token records keyed by the session cookie
pub struct SessionStore {
    records: RwLock<HashMap<SessionId, StoredRecord>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a record under a fresh session id
    pub async fn create(&self, record: TokenRecord) -> SessionId {
        let id = SessionId::new();
        self.put(id.clone(), record).await;
        id
    }

    /// Replace the record of an existing session, restarting its lifetime
    pub async fn put(&self, id: SessionId, record: TokenRecord) {
        let stored = StoredRecord {
            record,
            expires_at: Instant::now().checked_add(self.ttl),
        };
        self.records.write().await.insert(id, stored);
    }

    pub async fn get(&self, id: &SessionId) -> Option<TokenRecord> {
        {
            let records = self.records.read().await;
            match records.get(id) {
                Some(stored) if stored.is_live(Instant::now()) => {
                    return Some(stored.record.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        debug!("Session {} expired", id);
        self.records.write().await.remove(id);
        None
    }

    pub async fn remove(&self, id: &SessionId) -> bool {
        self.records.write().await.remove(id).is_some()
    }

    /// Drop every expired record; returns how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, stored| stored.is_live(now));
        before - records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(token: &str) -> TokenRecord {
        TokenRecord {
            access_token: token.to_string(),
            id_token: None,
            scope: None,
        }
    }

    #[tokio::test]
    async fn stores_and_removes_records() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(record("at")).await;

        assert_eq!(store.get(&id).await, Some(record("at")));
        assert!(store.remove(&id).await);
        assert_eq!(store.get(&id).await, None);
    }

    #[tokio::test]
    async fn expired_records_are_not_returned() {
        let store = SessionStore::new(Duration::ZERO);
        let id = store.create(record("at")).await;

        assert_eq!(store.get(&id).await, None);
        assert_eq!(store.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn unbounded_ttl_keeps_records() {
        let store = SessionStore::new(Duration::from_secs(u64::MAX));
        let id = store.create(record("at")).await;

        assert_eq!(store.get(&id).await, Some(record("at")));
        assert_eq!(store.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn purge_drops_expired_records() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(record("a")).await;
        store.create(record("b")).await;

        assert_eq!(store.purge_expired().await, 2);
    }
}

use crate::domain_model::{CredentialBundle, TempToken};
use crate::domain_port::{Clock, TempTokenStore, TempTokenStoreError};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::RngCore;
use std::sync::Arc;

/// Handoff-token lifetime. The store exists only to bridge one redirect
/// round-trip, so this stays short.
const TEMP_TOKEN_TTL_SECS: i64 = 300;

/// Token entropy in bytes. 32 bytes of OS randomness, hex-encoded to 64
/// characters.
const TEMP_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
struct StoredBundle {
    bundle: CredentialBundle,
    created_at: DateTime<Utc>,
}

/// In-process token store. Deliberately not persistent: a restart invalidates
/// outstanding handoff tokens, which is the intended failure mode.
pub struct InMemoryTempTokenStore {
    entries: DashMap<String, StoredBundle>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTempTokenStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    fn mint_token() -> String {
        let mut bytes = [0u8; TEMP_TOKEN_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    fn sweep_now(&self) -> usize {
        let threshold = self.clock.now() - Duration::seconds(TEMP_TOKEN_TTL_SECS);
        let before = self.entries.len();
        // Entries created exactly at the threshold instant survive; only
        // strictly older ones go.
        self.entries.retain(|_, stored| stored.created_at >= threshold);
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait::async_trait]
impl TempTokenStore for InMemoryTempTokenStore {
    async fn put(&self, bundle: CredentialBundle) -> Result<TempToken, TempTokenStoreError> {
        self.sweep_now();
        let token = Self::mint_token();
        self.entries.insert(
            token.clone(),
            StoredBundle {
                bundle,
                created_at: self.clock.now(),
            },
        );
        Ok(TempToken(token))
    }

    async fn get(&self, token: &str) -> Result<Option<CredentialBundle>, TempTokenStoreError> {
        self.sweep_now();
        Ok(self.entries.get(token).map(|stored| stored.bundle.clone()))
    }

    async fn sweep(&self) -> Result<usize, TempTokenStoreError> {
        Ok(self.sweep_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::ManualClock;
    use chrono::TimeZone;

    fn bundle(name: &str) -> CredentialBundle {
        CredentialBundle {
            access_token: format!("access-{name}"),
            refresh_token: Some(format!("refresh-{name}")),
            user_id: Some(format!("user-{name}")),
        }
    }

    fn store_with_clock() -> (Arc<ManualClock>, InMemoryTempTokenStore) {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let store = InMemoryTempTokenStore::new(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn put_then_get_returns_the_bundle() {
        let (_clock, store) = store_with_clock();

        let token = store.put(bundle("a")).await.unwrap();
        let found = store.get(token.as_str()).await.unwrap();

        assert_eq!(found, Some(bundle("a")));
    }

    #[tokio::test]
    async fn tokens_are_distinct_hex_strings() {
        let (_clock, store) = store_with_clock();

        let first = store.put(bundle("a")).await.unwrap();
        let second = store.put(bundle("a")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 64);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn token_survives_up_to_the_ttl_boundary() {
        let (clock, store) = store_with_clock();

        let token = store.put(bundle("a")).await.unwrap();
        clock.advance(Duration::seconds(300));

        assert!(store.get(token.as_str()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn token_is_gone_past_the_ttl() {
        let (clock, store) = store_with_clock();

        let token = store.put(bundle("a")).await.unwrap();
        clock.advance(Duration::seconds(301));

        assert_eq!(store.get(token.as_str()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sweep_removes_only_stale_entries() {
        let (clock, store) = store_with_clock();

        let old = store.put(bundle("old")).await.unwrap();
        clock.advance(Duration::seconds(200));
        let fresh = store.put(bundle("fresh")).await.unwrap();
        clock.advance(Duration::seconds(150));

        // old is now 350s in the past, fresh only 150s.
        assert_eq!(store.sweep().await.unwrap(), 1);
        assert_eq!(store.get(old.as_str()).await.unwrap(), None);
        assert!(store.get(fresh.as_str()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn put_sweeps_inline() {
        let (clock, store) = store_with_clock();

        let old = store.put(bundle("old")).await.unwrap();
        clock.advance(Duration::seconds(301));
        let fresh = store.put(bundle("fresh")).await.unwrap();

        // The stale entry was already dropped by put, so a sweep finds
        // nothing further to remove.
        assert_eq!(store.sweep().await.unwrap(), 0);
        assert_eq!(store.get(old.as_str()).await.unwrap(), None);
        assert!(store.get(fresh.as_str()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_token_is_absent() {
        let (_clock, store) = store_with_clock();

        assert_eq!(store.get("no-such-token").await.unwrap(), None);
    }
}

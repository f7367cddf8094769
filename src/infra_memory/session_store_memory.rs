use crate::domain_model::{SessionData, SessionId};
use crate::domain_port::{Clock, SessionStore, SessionStoreError};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Lifetime of a session that completed a login.
const PERMANENT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Lifetime of a pre-login session, which only carries the anti-replay state
/// across one redirect round-trip.
const TRANSIENT_SESSION_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
struct StoredSession {
    data: SessionData,
    touched_at: DateTime<Utc>,
}

impl StoredSession {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = if self.data.permanent {
            PERMANENT_SESSION_TTL_SECS
        } else {
            TRANSIENT_SESSION_TTL_SECS
        };
        self.touched_at < now - Duration::seconds(ttl)
    }
}

/// In-process session records keyed by random v4 ids. The id is the whole
/// secret, so the cookie carrying it needs no signing.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
        }
    }

    fn sweep_now(&self) {
        let now = self.clock.now();
        self.sessions.retain(|_, stored| !stored.expired(now));
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<SessionId, SessionStoreError> {
        self.sweep_now();
        let id = SessionId(Uuid::new_v4());
        self.sessions.insert(
            id,
            StoredSession {
                data: SessionData::default(),
                touched_at: self.clock.now(),
            },
        );
        Ok(id)
    }

    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, SessionStoreError> {
        self.sweep_now();
        Ok(self.sessions.get(id).map(|stored| stored.data.clone()))
    }

    async fn save(&self, id: &SessionId, data: SessionData) -> Result<(), SessionStoreError> {
        self.sweep_now();
        self.sessions.insert(
            *id,
            StoredSession {
                data,
                touched_at: self.clock.now(),
            },
        );
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.remove(id);
        Ok(())
    }
}

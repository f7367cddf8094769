use crate::domain_model::{SessionData, SessionId};

/// Server-side session records, one per browser client.
///
/// Records carry their own lifetime: 24 hours for permanent sessions, 1 hour
/// for pre-login ones, measured from the last write. Expired records are
/// swept on access, like the temp token store.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Allocate a fresh, empty session and return its id.
    async fn create(&self) -> Result<SessionId, SessionStoreError>;

    /// Load a session, `None` if unknown or expired.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, SessionStoreError>;

    /// Overwrite a session's data, resetting its lifetime.
    async fn save(&self, id: &SessionId, data: SessionData) -> Result<(), SessionStoreError>;

    /// Remove a session. Removing an unknown id is not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("store error: {0}")]
    Store(String),
}

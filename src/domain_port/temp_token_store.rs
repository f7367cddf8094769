use crate::domain_model::{CredentialBundle, TempToken};

/// Store of short-lived handoff tokens minted after a successful login.
///
/// Entries expire 300 seconds after creation. Implementations sweep expired
/// entries on every `put` and `get`, so callers never observe a token past
/// its window; `sweep` only removes entries strictly older than the
/// threshold, never one minted at the threshold instant.
#[async_trait::async_trait]
pub trait TempTokenStore: Send + Sync {
    /// Mint an unguessable token and store the bundle under it.
    async fn put(&self, bundle: CredentialBundle) -> Result<TempToken, TempTokenStoreError>;

    /// Look up a token, `None` if unknown or expired.
    async fn get(&self, token: &str) -> Result<Option<CredentialBundle>, TempTokenStoreError>;

    /// Drop expired entries, returning how many were removed.
    async fn sweep(&self) -> Result<usize, TempTokenStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TempTokenStoreError {
    #[error("store error: {0}")]
    Store(String),
}

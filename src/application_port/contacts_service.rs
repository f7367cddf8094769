use super::ResolvedCredential;
use crate::domain_model::{GroupedContacts, Profile, SessionId};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Token expired")]
    SessionExpired,
    #[error("directory request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("directory unreachable: {0}")]
    Unreachable(String),
    #[error("store error: {0}")]
    Store(String),
}

/// Fetches directory data with a resolved credential, refreshing the access
/// token once on a 401 where the session allows it.
#[async_trait::async_trait]
pub trait ContactsService: Send + Sync {
    /// List the user's contacts grouped by email domain.
    ///
    /// On a 401 the session's refresh token (never the bearer bundle's) buys
    /// exactly one retry; a second 401, a refresh failure, or a missing
    /// refresh token clears the session and fails with `SessionExpired`.
    async fn fetch_contacts(
        &self,
        credential: &ResolvedCredential,
        session_id: Option<SessionId>,
    ) -> Result<GroupedContacts, GatewayError>;

    /// Fetch the user's own profile. No refresh on 401: a rejected token
    /// surfaces as an upstream failure.
    async fn fetch_profile(&self, credential: &ResolvedCredential)
    -> Result<Profile, GatewayError>;
}

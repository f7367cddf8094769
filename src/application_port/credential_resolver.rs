use crate::domain_model::SessionId;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("store error: {0}")]
    Store(String),
}

/// Which credential source satisfied the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    TempToken,
    Session,
}

/// The access token picked for one request, plus the refresh token and user
/// id that rode along with it. Valid for the request's lifetime only.
#[derive(Debug, Clone)]
pub struct ResolvedCredential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub source: CredentialSource,
}

/// Picks the credential for a request: a `Bearer` handoff token wins over the
/// session cookie, and the two are never merged.
///
/// The bearer path exists only to survive the one bootstrap request a client
/// makes before it holds a first-party cookie; it is bounded by the token
/// store's 5-minute window and is not an API-key mechanism.
#[async_trait::async_trait]
pub trait CredentialResolver: Send + Sync {
    /// `authorization` is the raw `Authorization` header value, if any.
    async fn resolve(
        &self,
        authorization: Option<&str>,
        session_id: Option<SessionId>,
    ) -> Result<ResolvedCredential, ResolveError>;
}

use crate::domain_model::SessionId;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid state parameter")]
    InvalidState,
    #[error("{0}")]
    Provider(String),
    #[error("No code received")]
    MissingCode,
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Everything the provider may hand back on the callback redirect.
#[derive(Debug, Clone, Default)]
pub struct CallbackInput {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoginRedirect {
    pub authorize_url: String,
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub redirect_url: String,
    pub session_id: SessionId,
}

/// Authentication state of one request. `access_token` is only filled on the
/// bearer path; the session path never exposes the token.
#[derive(Debug, Clone, Default)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
}

/// Drives the authorization-code flow: login redirect, callback validation
/// and code exchange, handoff-token minting and exchange, status, logout.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Stash a fresh anti-replay state in the session (creating one if
    /// needed) and build the provider authorization URL.
    async fn begin_login(&self, session_id: Option<SessionId>)
    -> Result<LoginRedirect, AuthError>;

    /// Validate the callback, exchange the code, write the credential into
    /// the session, and mint a handoff token for the frontend redirect.
    async fn complete_login(
        &self,
        session_id: Option<SessionId>,
        callback: CallbackInput,
    ) -> Result<LoginOutcome, AuthError>;

    /// Trade a handoff token for first-party session state. Idempotent
    /// within the token's lifetime; the token is left to expire naturally.
    async fn exchange_temp_token(
        &self,
        session_id: Option<SessionId>,
        token: &str,
    ) -> Result<SessionId, AuthError>;

    /// Report authentication state without refreshing anything.
    async fn status(
        &self,
        authorization: Option<&str>,
        session_id: Option<SessionId>,
    ) -> Result<AuthStatus, AuthError>;

    /// Drop the session. Upstream tokens are not revoked (the provider
    /// offers no revocation endpoint).
    async fn logout(&self, session_id: Option<SessionId>) -> Result<(), AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and said no; carries its description.
    #[error("{0}")]
    Rejected(String),
    #[error("provider unreachable: {0}")]
    Unreachable(String),
}

/// Tokens minted by the identity provider. `user_id` is the subject's
/// directory object id when the provider included an id token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

/// The OAuth2 identity provider, reduced to the three calls the flow needs.
/// Scope set and redirect URI are fixed by the implementation; the
/// authorization and token steps must agree on both.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    fn authorization_url(&self, state: &str) -> String;

    async fn exchange_code(&self, code: &str) -> Result<ProviderTokens, ProviderError>;

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderTokens, ProviderError>;
}

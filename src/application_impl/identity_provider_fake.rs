use crate::application_port::*;

#[derive(Debug)]
pub struct FakeIdentityProvider;

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal fake implementation for local runs and tests. Codes look like
// "fake-code:<name>" and mint matching fake tokens for that name.
#[async_trait::async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "https://login.fake.test/oauth2/v2.0/authorize?client_id=fake-client&response_type=code&state={}",
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderTokens, ProviderError> {
        if let Some(name) = code.strip_prefix("fake-code:") {
            Ok(get_fake_tokens(name))
        } else {
            Err(ProviderError::Rejected("invalid authorization code".into()))
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderTokens, ProviderError> {
        if let Some(name) = refresh_token.strip_prefix("fake-refresh-token:") {
            Ok(get_fake_tokens(name))
        } else {
            Err(ProviderError::Rejected("invalid refresh token".into()))
        }
    }
}

fn get_fake_tokens(name: &str) -> ProviderTokens {
    let user_id = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes());
    ProviderTokens {
        access_token: format!("fake-access-token:{}", name),
        refresh_token: Some(format!("fake-refresh-token:{}", name)),
        user_id: Some(user_id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn a_fake_code_mints_matching_tokens() {
        let provider = FakeIdentityProvider::new();

        let tokens = provider.exchange_code("fake-code:alice").await.unwrap();

        assert_eq!(tokens.access_token, "fake-access-token:alice");
        assert_eq!(
            tokens.refresh_token.as_deref(),
            Some("fake-refresh-token:alice")
        );
        assert!(tokens.user_id.is_some());
    }

    #[tokio::test]
    async fn the_same_name_always_maps_to_the_same_user_id() {
        let provider = FakeIdentityProvider::new();

        let first = provider.exchange_code("fake-code:alice").await.unwrap();
        let second = provider
            .refresh("fake-refresh-token:alice")
            .await
            .unwrap();

        assert_eq!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn an_unknown_code_is_rejected() {
        let provider = FakeIdentityProvider::new();

        let err = provider.exchange_code("AAA123").await.unwrap_err();

        assert!(matches!(err, ProviderError::Rejected(_)));
    }

    #[test]
    fn the_authorization_url_carries_the_state() {
        let provider = FakeIdentityProvider::new();

        let url = provider.authorization_url("abc 123");

        assert!(url.contains("state=abc%20123"));
    }
}

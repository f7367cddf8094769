use crate::application_port::*;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::Client;
use serde::Deserialize;

use super::http::pooled_client;

/// Scopes requested on both the authorize and token steps. `offline_access`
/// is what makes the provider hand back a refresh token.
const SCOPES: &str = "User.Read Contacts.Read offline_access";

/// Azure AD application settings. `authority` is the login host, normally
/// `https://login.microsoftonline.com`.
#[derive(Debug, Clone)]
pub struct MicrosoftConfig {
    pub client_id: String,
    pub client_secret: String,
    pub tenant: String,
    pub redirect_uri: String,
    pub authority: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    id_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

pub struct MicrosoftIdentityProvider {
    config: MicrosoftConfig,
    client: Client,
}

impl MicrosoftIdentityProvider {
    pub fn try_new(config: MicrosoftConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: pooled_client()?,
            config,
        })
    }

    fn authorization_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/authorize",
            self.config.authority, self.config.tenant
        )
    }

    fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.config.authority, self.config.tenant
        )
    }

    async fn request_tokens(
        &self,
        params: &[(&str, &str)],
    ) -> Result<ProviderTokens, ProviderError> {
        let response = self
            .client
            .post(self.token_endpoint())
            .form(params)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let detail: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            let message = detail
                .error_description
                .or(detail.error)
                .unwrap_or_else(|| format!("token endpoint returned {}", status));
            return Err(ProviderError::Rejected(message));
        }

        let tokens: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| ProviderError::Rejected("Failed to obtain access token".into()))?;

        Ok(ProviderTokens {
            user_id: tokens.id_token.as_deref().and_then(id_token_oid),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}

/// Pull the `oid` claim out of an id token payload. The signature is not
/// checked; the value is informational only and never gates access.
fn id_token_oid(id_token: &str) -> Option<String> {
    let payload = id_token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    claims
        .get("oid")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[async_trait::async_trait]
impl IdentityProvider for MicrosoftIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&response_type=code&redirect_uri={}&response_mode=query&scope={}&state={}",
            self.authorization_endpoint(),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<ProviderTokens, ProviderError> {
        self.request_tokens(&[
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", SCOPES),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderTokens, ProviderError> {
        self.request_tokens(&[
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
            ("scope", SCOPES),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(authority: &str) -> MicrosoftIdentityProvider {
        MicrosoftIdentityProvider::try_new(MicrosoftConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            tenant: "test-tenant".into(),
            redirect_uri: "http://localhost:8080/auth/callback".into(),
            authority: authority.into(),
        })
        .unwrap()
    }

    fn fake_id_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn the_authorization_url_carries_every_oauth_parameter() {
        let provider = provider_for("https://login.microsoftonline.com");

        let url = provider.authorization_url("state-token");

        assert!(url.starts_with(
            "https://login.microsoftonline.com/test-tenant/oauth2/v2.0/authorize?"
        ));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fcallback"));
        assert!(url.contains("scope=User.Read%20Contacts.Read%20offline_access"));
        assert!(url.contains("state=state-token"));
    }

    #[tokio::test]
    async fn exchange_posts_the_code_grant_and_decodes_the_oid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=AAA123"))
            .and(body_string_contains("client_secret=client-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-1",
                "refresh_token": "refresh-1",
                "id_token": fake_id_token(json!({"oid": "user-123", "aud": "client-id"})),
            })))
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider_for(&server.uri());

        let tokens = provider.exchange_code("AAA123").await.unwrap();

        assert_eq!(tokens.access_token, "access-1");
        assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(tokens.user_id.as_deref(), Some("user-123"));
    }

    #[tokio::test]
    async fn refresh_posts_the_refresh_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "access-2"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider_for(&server.uri());

        let tokens = provider.refresh("refresh-1").await.unwrap();

        assert_eq!(tokens.access_token, "access-2");
        assert_eq!(tokens.refresh_token, None);
        assert_eq!(tokens.user_id, None);
    }

    #[tokio::test]
    async fn a_rejection_surfaces_the_error_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "AADSTS70008: The provided grant has expired.",
            })))
            .mount(&server)
            .await;
        let provider = provider_for(&server.uri());

        let err = provider.exchange_code("stale").await.unwrap_err();

        match err {
            ProviderError::Rejected(message) => {
                assert!(message.starts_with("AADSTS70008"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_rejection_without_a_description_falls_back_to_the_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})),
            )
            .mount(&server)
            .await;
        let provider = provider_for(&server.uri());

        let err = provider.exchange_code("AAA123").await.unwrap_err();

        assert_eq!(err.to_string(), "invalid_client");
    }

    #[tokio::test]
    async fn a_success_without_an_access_token_is_a_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/test-tenant/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})),
            )
            .mount(&server)
            .await;
        let provider = provider_for(&server.uri());

        let err = provider.exchange_code("AAA123").await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to obtain access token");
    }

    #[tokio::test]
    async fn an_unreachable_endpoint_maps_to_unreachable() {
        let provider = provider_for("http://127.0.0.1:1");

        let err = provider.exchange_code("AAA123").await.unwrap_err();

        assert!(matches!(err, ProviderError::Unreachable(_)));
    }

    #[test]
    fn oid_extraction_tolerates_garbage_id_tokens() {
        assert_eq!(
            id_token_oid(&fake_id_token(json!({"oid": "user-123"}))).as_deref(),
            Some("user-123")
        );
        assert_eq!(id_token_oid(&fake_id_token(json!({"sub": "abc"}))), None);
        assert_eq!(id_token_oid("only-one-segment"), None);
        assert_eq!(id_token_oid("a.!!!not-base64!!!.c"), None);
    }
}

use crate::application_port::*;
use crate::domain_model::{CredentialBundle, SessionData, SessionId};
use crate::domain_port::{SessionStore, TempTokenStore};
use rand::RngCore;
use rand::rngs::OsRng;
use std::sync::Arc;

const STATE_BYTES: usize = 16;

pub struct RealAuthService {
    provider: Arc<dyn IdentityProvider>,
    temp_tokens: Arc<dyn TempTokenStore>,
    sessions: Arc<dyn SessionStore>,
    resolver: Arc<dyn CredentialResolver>,
    frontend_url: String,
}

impl RealAuthService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        temp_tokens: Arc<dyn TempTokenStore>,
        sessions: Arc<dyn SessionStore>,
        resolver: Arc<dyn CredentialResolver>,
        frontend_url: String,
    ) -> Self {
        Self {
            provider,
            temp_tokens,
            sessions,
            resolver,
            frontend_url,
        }
    }

    fn new_state() -> String {
        let mut bytes = [0u8; STATE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Load the caller's session, or start a fresh one when the cookie is
    /// absent or no longer backed by a record.
    async fn load_or_create(
        &self,
        session_id: Option<SessionId>,
    ) -> Result<(SessionId, SessionData), AuthError> {
        if let Some(id) = session_id {
            if let Some(data) = self.sessions.load(&id).await.map_err(store_err)? {
                return Ok((id, data));
            }
        }
        let id = self.sessions.create().await.map_err(store_err)?;
        Ok((id, SessionData::default()))
    }
}

fn store_err(e: crate::domain_port::SessionStoreError) -> AuthError {
    AuthError::Store(e.to_string())
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn begin_login(
        &self,
        session_id: Option<SessionId>,
    ) -> Result<LoginRedirect, AuthError> {
        let (id, mut session) = self.load_or_create(session_id).await?;
        let state = Self::new_state();
        session.oauth_state = Some(state.clone());
        self.sessions.save(&id, session).await.map_err(store_err)?;

        Ok(LoginRedirect {
            authorize_url: self.provider.authorization_url(&state),
            session_id: id,
        })
    }

    async fn complete_login(
        &self,
        session_id: Option<SessionId>,
        callback: CallbackInput,
    ) -> Result<LoginOutcome, AuthError> {
        let loaded = match session_id {
            Some(id) => self
                .sessions
                .load(&id)
                .await
                .map_err(store_err)?
                .map(|data| (id, data)),
            None => None,
        };
        // Both sides of the state comparison must be present. A missing
        // session, a missing stored state, or a missing query parameter all
        // fail the same way a mismatch does.
        let (id, mut session) = match loaded {
            Some(entry) => entry,
            None => return Err(AuthError::InvalidState),
        };
        match (callback.state.as_deref(), session.oauth_state.as_deref()) {
            (Some(returned), Some(stored)) if returned == stored => {}
            _ => return Err(AuthError::InvalidState),
        }

        if let Some(error) = callback.error {
            return Err(AuthError::Provider(
                callback.error_description.unwrap_or(error),
            ));
        }
        let code = callback.code.ok_or(AuthError::MissingCode)?;

        let tokens = self
            .provider
            .exchange_code(&code)
            .await
            .map_err(|e| match e {
                ProviderError::Rejected(message) => AuthError::Provider(message),
                ProviderError::Unreachable(message) => AuthError::InternalError(message),
            })?;

        session.access_token = Some(tokens.access_token.clone());
        session.refresh_token = tokens.refresh_token.clone();
        session.user_id = tokens.user_id.clone();
        session.permanent = true;
        self.sessions.save(&id, session).await.map_err(store_err)?;

        let temp = self
            .temp_tokens
            .put(CredentialBundle {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                user_id: tokens.user_id,
            })
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(LoginOutcome {
            redirect_url: format!(
                "{}/contacts?auth=success&token={}",
                self.frontend_url, temp
            ),
            session_id: id,
        })
    }

    async fn exchange_temp_token(
        &self,
        session_id: Option<SessionId>,
        token: &str,
    ) -> Result<SessionId, AuthError> {
        let bundle = self
            .temp_tokens
            .get(token)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        let (id, mut session) = self.load_or_create(session_id).await?;
        session.access_token = Some(bundle.access_token);
        session.refresh_token = bundle.refresh_token;
        session.user_id = bundle.user_id;
        session.permanent = true;
        self.sessions.save(&id, session).await.map_err(store_err)?;

        Ok(id)
    }

    async fn status(
        &self,
        authorization: Option<&str>,
        session_id: Option<SessionId>,
    ) -> Result<AuthStatus, AuthError> {
        match self.resolver.resolve(authorization, session_id).await {
            Ok(credential) => Ok(AuthStatus {
                authenticated: true,
                user_id: credential.user_id,
                // The session path never echoes the access token back out.
                access_token: (credential.source == CredentialSource::TempToken)
                    .then_some(credential.access_token),
            }),
            Err(ResolveError::Unauthenticated) => Ok(AuthStatus::default()),
            Err(ResolveError::Store(message)) => Err(AuthError::Store(message)),
        }
    }

    async fn logout(&self, session_id: Option<SessionId>) -> Result<(), AuthError> {
        if let Some(id) = session_id {
            self.sessions.delete(&id).await.map_err(store_err)?;
        }
        Ok(())
    }
}

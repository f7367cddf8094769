use crate::application_port::*;
use crate::domain_model::SessionId;
use crate::domain_port::{SessionStore, TempTokenStore};
use std::sync::Arc;

pub struct RealCredentialResolver {
    temp_tokens: Arc<dyn TempTokenStore>,
    sessions: Arc<dyn SessionStore>,
}

impl RealCredentialResolver {
    pub fn new(temp_tokens: Arc<dyn TempTokenStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            temp_tokens,
            sessions,
        }
    }
}

#[async_trait::async_trait]
impl CredentialResolver for RealCredentialResolver {
    async fn resolve(
        &self,
        authorization: Option<&str>,
        session_id: Option<SessionId>,
    ) -> Result<ResolvedCredential, ResolveError> {
        if let Some(token) = authorization.and_then(|header| header.strip_prefix("Bearer ")) {
            let found = self
                .temp_tokens
                .get(token)
                .await
                .map_err(|e| ResolveError::Store(e.to_string()))?;
            if let Some(bundle) = found {
                return Ok(ResolvedCredential {
                    access_token: bundle.access_token,
                    refresh_token: bundle.refresh_token,
                    user_id: bundle.user_id,
                    source: CredentialSource::TempToken,
                });
            }
            // An unknown or expired bearer token falls through to the
            // session rather than failing outright.
        }

        if let Some(id) = session_id {
            let session = self
                .sessions
                .load(&id)
                .await
                .map_err(|e| ResolveError::Store(e.to_string()))?;
            if let Some(session) = session {
                if let Some(access_token) = session.access_token {
                    return Ok(ResolvedCredential {
                        access_token,
                        refresh_token: session.refresh_token,
                        user_id: session.user_id,
                        source: CredentialSource::Session,
                    });
                }
            }
        }

        Err(ResolveError::Unauthenticated)
    }
}

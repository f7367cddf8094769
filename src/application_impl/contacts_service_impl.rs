use crate::application_port::*;
use crate::domain_model::{
    DirectoryContact, DomainGroup, GroupedContact, GroupedContacts, Profile, SessionId,
};
use crate::domain_port::SessionStore;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct RealContactsService {
    directory: Arc<dyn DirectoryApi>,
    provider: Arc<dyn IdentityProvider>,
    sessions: Arc<dyn SessionStore>,
}

impl RealContactsService {
    pub fn new(
        directory: Arc<dyn DirectoryApi>,
        provider: Arc<dyn IdentityProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            directory,
            provider,
            sessions,
        }
    }

    /// Refresh the session's access token and return the new one. Every
    /// failure path clears the session so the next `/auth/status` reports
    /// unauthenticated.
    ///
    /// TODO: two concurrent requests on one session can both refresh; a
    /// per-session dedup would save the extra token round trip.
    async fn refresh_session(&self, id: &SessionId) -> Result<String, GatewayError> {
        let mut session = match self.sessions.load(id).await.map_err(store_err)? {
            Some(session) => session,
            None => return Err(GatewayError::SessionExpired),
        };
        let refresh_token = match session.refresh_token.clone() {
            Some(token) => token,
            None => {
                self.sessions.delete(id).await.map_err(store_err)?;
                return Err(GatewayError::SessionExpired);
            }
        };
        match self.provider.refresh(&refresh_token).await {
            Ok(tokens) => {
                // Only the access token is replaced. Providers that rotate
                // refresh tokens get picked up on the next full login.
                session.access_token = Some(tokens.access_token.clone());
                self.sessions.save(id, session).await.map_err(store_err)?;
                Ok(tokens.access_token)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "token refresh failed");
                self.sessions.delete(id).await.map_err(store_err)?;
                Err(GatewayError::SessionExpired)
            }
        }
    }
}

fn store_err(e: crate::domain_port::SessionStoreError) -> GatewayError {
    GatewayError::Store(e.to_string())
}

fn upstream_error(e: DirectoryError) -> GatewayError {
    match e {
        DirectoryError::Unauthorized => GatewayError::Upstream {
            status: 401,
            message: "directory rejected the access token".into(),
        },
        DirectoryError::Status { status, message } => GatewayError::Upstream { status, message },
        DirectoryError::Unreachable(message) => GatewayError::Unreachable(message),
        DirectoryError::Decode(message) => GatewayError::Upstream {
            status: 502,
            message,
        },
    }
}

/// One entry per (contact, email address) pair, bucketed by the part after
/// the first `@`. Addresses without a domain are dropped.
fn group_by_domain(contacts: Vec<DirectoryContact>) -> GroupedContacts {
    let mut groups: BTreeMap<String, Vec<GroupedContact>> = BTreeMap::new();
    for contact in &contacts {
        for email in &contact.email_addresses {
            let domain = match email.splitn(2, '@').nth(1) {
                Some(domain) if !domain.is_empty() => domain,
                _ => continue,
            };
            groups
                .entry(domain.to_string())
                .or_default()
                .push(GroupedContact::for_email(contact, email));
        }
    }

    let mut total_contacts = 0;
    let data: Vec<DomainGroup> = groups
        .into_iter()
        .map(|(domain, mut members)| {
            members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
            total_contacts += members.len();
            DomainGroup {
                domain,
                count: members.len(),
                contacts: members,
            }
        })
        .collect();

    GroupedContacts {
        total_domains: data.len(),
        total_contacts,
        data,
    }
}

#[async_trait::async_trait]
impl ContactsService for RealContactsService {
    async fn fetch_contacts(
        &self,
        credential: &ResolvedCredential,
        session_id: Option<SessionId>,
    ) -> Result<GroupedContacts, GatewayError> {
        match self.directory.list_contacts(&credential.access_token).await {
            Ok(contacts) => Ok(group_by_domain(contacts)),
            Err(DirectoryError::Unauthorized) => {
                let id = match session_id {
                    Some(id) => id,
                    None => return Err(GatewayError::SessionExpired),
                };
                let access_token = self.refresh_session(&id).await?;
                match self.directory.list_contacts(&access_token).await {
                    Ok(contacts) => Ok(group_by_domain(contacts)),
                    Err(DirectoryError::Unauthorized) => {
                        self.sessions.delete(&id).await.map_err(store_err)?;
                        Err(GatewayError::SessionExpired)
                    }
                    Err(other) => Err(upstream_error(other)),
                }
            }
            Err(other) => Err(upstream_error(other)),
        }
    }

    async fn fetch_profile(
        &self,
        credential: &ResolvedCredential,
    ) -> Result<Profile, GatewayError> {
        self.directory
            .fetch_profile(&credential.access_token)
            .await
            .map_err(upstream_error)
    }
}

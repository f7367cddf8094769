use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_microsoft::*;
use crate::logger::*;
use crate::settings::Settings;
use std::sync::Arc;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub contacts_service: Arc<dyn ContactsService>,
    pub credential_resolver: Arc<dyn CredentialResolver>,
    pub secure_cookies: bool,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("secure_cookies", &self.secure_cookies)
            .finish_non_exhaustive()
    }
}

impl Server {
    pub fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let temp_tokens: Arc<dyn TempTokenStore> =
            Arc::new(InMemoryTempTokenStore::new(clock.clone()));
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(clock));

        let (provider, directory) = match settings.provider.backend.as_str() {
            "fake" => {
                let provider: Arc<dyn IdentityProvider> = Arc::new(FakeIdentityProvider::new());
                let directory: Arc<dyn DirectoryApi> = Arc::new(FakeDirectoryApi::new());
                (provider, directory)
            }
            "microsoft" => {
                let provider: Arc<dyn IdentityProvider> =
                    Arc::new(MicrosoftIdentityProvider::try_new(MicrosoftConfig {
                        client_id: settings.provider.client_id.clone(),
                        client_secret: settings.provider.client_secret.clone(),
                        tenant: settings.provider.tenant.clone(),
                        redirect_uri: settings.provider.redirect_uri.clone(),
                        authority: settings.provider.authority.clone(),
                    })?);
                let directory: Arc<dyn DirectoryApi> = Arc::new(MicrosoftDirectoryApi::try_new(
                    settings.directory.base_url.clone(),
                )?);
                (provider, directory)
            }
            other => return Err(anyhow::anyhow!("Unknown provider backend: {}", other)),
        };

        let credential_resolver: Arc<dyn CredentialResolver> = Arc::new(
            RealCredentialResolver::new(temp_tokens.clone(), sessions.clone()),
        );

        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            provider.clone(),
            temp_tokens,
            sessions.clone(),
            credential_resolver.clone(),
            settings.frontend.url.clone(),
        ));

        let contacts_service: Arc<dyn ContactsService> =
            Arc::new(RealContactsService::new(directory, provider, sessions));

        info!("server started");

        Ok(Self {
            auth_service,
            contacts_service,
            credential_resolver,
            secure_cookies: settings.http.secure_cookies,
        })
    }
}

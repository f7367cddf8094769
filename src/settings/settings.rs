use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub provider: Provider,
    pub directory: Directory,
    pub frontend: Frontend,
    pub http: Http,
    pub log: Log,
}

/// Identity provider settings. `client_secret` is redacted from `Debug`
/// output so startup logging cannot leak it.
#[derive(Deserialize)]
pub struct Provider {
    pub backend: String, // "fake" or "microsoft"
    pub client_id: String,
    pub client_secret: String,
    pub tenant: String,
    pub redirect_uri: String,
    pub authority: String,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("backend", &self.backend)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("tenant", &self.tenant)
            .field("redirect_uri", &self.redirect_uri)
            .field("authority", &self.authority)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct Directory {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Frontend {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Environment variables override the file, e.g.
/// `ROLODEX__PROVIDER__CLIENT_SECRET` for the secret that should never live
/// in a checked-in toml.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("ROLODEX").separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_settings_parse_with_the_fake_backend() {
        let settings = parse_settings(Some("settings/dev.toml")).unwrap();

        assert_eq!(settings.provider.backend, "fake");
        assert!(!settings.http.secure_cookies);
    }

    #[test]
    fn debug_output_redacts_the_client_secret() {
        let provider = Provider {
            backend: "microsoft".into(),
            client_id: "client-id".into(),
            client_secret: "super-secret".into(),
            tenant: "common".into(),
            redirect_uri: "http://localhost:8080/auth/callback".into(),
            authority: "https://login.microsoftonline.com".into(),
        };

        let debug = format!("{:?}", provider);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}

use crate::application_port::*;
use crate::domain_model::{DirectoryContact, Profile};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::http::pooled_client;

/// One page of the Graph contacts collection.
#[derive(Debug, Deserialize)]
struct ContactsPage {
    #[serde(default)]
    value: Vec<GraphContact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphContact {
    id: Option<String>,
    display_name: Option<String>,
    given_name: Option<String>,
    surname: Option<String>,
    job_title: Option<String>,
    company_name: Option<String>,
    mobile_phone: Option<String>,
    #[serde(default)]
    business_phones: Vec<String>,
    #[serde(default)]
    email_addresses: Vec<GraphEmailAddress>,
}

#[derive(Debug, Deserialize)]
struct GraphEmailAddress {
    address: Option<String>,
}

impl GraphContact {
    fn into_contact(self) -> DirectoryContact {
        DirectoryContact {
            id: self.id.unwrap_or_default(),
            display_name: self.display_name.unwrap_or_default(),
            given_name: self.given_name.unwrap_or_default(),
            surname: self.surname.unwrap_or_default(),
            job_title: self.job_title.unwrap_or_default(),
            company_name: self.company_name.unwrap_or_default(),
            mobile_phone: self.mobile_phone.unwrap_or_default(),
            business_phones: self.business_phones,
            email_addresses: self
                .email_addresses
                .into_iter()
                .filter_map(|e| e.address)
                .collect(),
        }
    }
}

/// Microsoft Graph as the contacts directory. `base_url` is normally
/// `https://graph.microsoft.com`.
pub struct MicrosoftDirectoryApi {
    base_url: String,
    client: Client,
}

impl MicrosoftDirectoryApi {
    pub fn try_new(base_url: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: pooled_client()?,
            base_url,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, DirectoryError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(DirectoryError::Unauthorized);
        }
        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl DirectoryApi for MicrosoftDirectoryApi {
    async fn list_contacts(
        &self,
        access_token: &str,
    ) -> Result<Vec<DirectoryContact>, DirectoryError> {
        let url = format!("{}/v1.0/me/contacts", self.base_url);
        let page: ContactsPage = self.get_json(&url, access_token).await?;
        Ok(page.value.into_iter().map(GraphContact::into_contact).collect())
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, DirectoryError> {
        let url = format!("{}/v1.0/me", self.base_url);
        self.get_json(&url, access_token).await
    }
}

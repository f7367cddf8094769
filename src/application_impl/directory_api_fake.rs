use crate::application_port::*;
use crate::domain_model::{DirectoryContact, Profile};

#[derive(Debug)]
pub struct FakeDirectoryApi;

impl FakeDirectoryApi {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeDirectoryApi {
    fn default() -> Self {
        Self::new()
    }
}

// Serves a small fixed address book to any "fake-access-token:<name>" token.
#[async_trait::async_trait]
impl DirectoryApi for FakeDirectoryApi {
    async fn list_contacts(
        &self,
        access_token: &str,
    ) -> Result<Vec<DirectoryContact>, DirectoryError> {
        let _name = token_owner(access_token)?;
        Ok(vec![
            DirectoryContact {
                id: "fake-contact-1".into(),
                display_name: "Bella Quinn".into(),
                given_name: "Bella".into(),
                surname: "Quinn".into(),
                job_title: "Engineer".into(),
                company_name: "Example Corp".into(),
                mobile_phone: "+1 555 0100".into(),
                business_phones: vec!["+1 555 0101".into()],
                email_addresses: vec!["bella@example.com".into()],
            },
            DirectoryContact {
                id: "fake-contact-2".into(),
                display_name: "Avery Park".into(),
                given_name: "Avery".into(),
                surname: "Park".into(),
                job_title: "Designer".into(),
                company_name: "Example Corp".into(),
                mobile_phone: "+1 555 0102".into(),
                business_phones: vec![],
                email_addresses: vec!["avery@example.com".into(), "avery@partner.test".into()],
            },
        ])
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, DirectoryError> {
        let name = token_owner(access_token)?;
        Ok(Profile {
            id: Some(format!("fake-user-{}", name)),
            display_name: Some(name.to_string()),
            mail: Some(format!("{}@example.com", name)),
            user_principal_name: Some(format!("{}@example.com", name)),
            job_title: None,
            office_location: None,
        })
    }
}

fn token_owner(access_token: &str) -> Result<&str, DirectoryError> {
    access_token
        .strip_prefix("fake-access-token:")
        .ok_or(DirectoryError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn a_fake_token_lists_the_fixed_address_book() {
        let directory = FakeDirectoryApi::new();

        let contacts = directory
            .list_contacts("fake-access-token:alice")
            .await
            .unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].email_addresses.len(), 2);
    }

    #[tokio::test]
    async fn any_other_token_is_unauthorized() {
        let directory = FakeDirectoryApi::new();

        let err = directory.list_contacts("expired").await.unwrap_err();

        assert!(matches!(err, DirectoryError::Unauthorized));
    }

    #[tokio::test]
    async fn the_profile_reflects_the_token_owner() {
        let directory = FakeDirectoryApi::new();

        let profile = directory
            .fetch_profile("fake-access-token:alice")
            .await
            .unwrap();

        assert_eq!(profile.display_name.as_deref(), Some("alice"));
        assert_eq!(profile.mail.as_deref(), Some("alice@example.com"));
    }
}

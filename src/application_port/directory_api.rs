use crate::domain_model::{DirectoryContact, Profile};

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The directory rejected the access token (HTTP 401).
    #[error("directory rejected the access token")]
    Unauthorized,
    #[error("directory returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("directory unreachable: {0}")]
    Unreachable(String),
    #[error("malformed directory response: {0}")]
    Decode(String),
}

/// The remote directory holding the user's contacts and profile.
#[async_trait::async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_contacts(
        &self,
        access_token: &str,
    ) -> Result<Vec<DirectoryContact>, DirectoryError>;

    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, DirectoryError>;
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(SessionId)
    }
}

/// Server-side session record, keyed by [`SessionId`] carried in a cookie.
///
/// `oauth_state` is the anti-replay value for the login round-trip; the token
/// fields are filled in once a callback or token exchange succeeds. Permanent
/// sessions outlive the pre-login window (24 h vs 1 h, measured from the last
/// write).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub oauth_state: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub permanent: bool,
}

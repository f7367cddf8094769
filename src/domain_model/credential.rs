use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-issued credentials held on behalf of one signed-in user.
///
/// The bundle is owned by the temporary token store while its handoff token
/// lives, and is copied (not moved) into the session on exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

/// Opaque handoff token bridging one redirect round-trip where the session
/// cookie cannot follow. 32 bytes of OS randomness, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TempToken(pub String);

impl fmt::Display for TempToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TempToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

use crate::domain_model::SessionId;

/// Cookie carrying the session id.
pub const SESSION_COOKIE_NAME: &str = "rolodex_session";

/// Cookie max age in seconds (24 hours), matching the permanent session TTL.
pub const SESSION_COOKIE_MAX_AGE: i64 = 86400;

/// Build the `Set-Cookie` value for a session. `SameSite=None` so the cookie
/// rides on cross-origin requests from the frontend; browsers require the
/// Secure flag alongside it everywhere but localhost, so `secure` is only
/// ever off for local http runs.
pub fn session_cookie(session_id: &SessionId, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={session_id}; HttpOnly{secure_flag}; SameSite=None; Path=/; Max-Age={SESSION_COOKIE_MAX_AGE}"
    )
}

/// Build the `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE_NAME}=; HttpOnly{secure_flag}; SameSite=None; Path=/; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id() -> SessionId {
        SessionId(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
    }

    #[test]
    fn secure_session_cookie_carries_every_attribute() {
        let cookie = session_cookie(&id(), true);

        assert!(cookie.starts_with("rolodex_session=550e8400-e29b-41d4-a716-446655440000"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn insecure_session_cookie_drops_only_the_secure_flag() {
        let cookie = session_cookie(&id(), false);

        assert!(cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
    }

    #[test]
    fn the_clearing_cookie_is_empty_and_expired() {
        let cookie = clear_session_cookie(true);

        assert!(cookie.starts_with("rolodex_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}

//! Kick OAuth constants
//!
//! Endpoint paths are relative to the configured auth base URL, which
//! differs between production and development deployments.

/// Authorization endpoint (browser redirect target, never called directly)
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Token endpoint for code exchange and token refresh
pub const TOKEN_PATH: &str = "/oauth/token";

/// Revocation endpoint
pub const REVOKE_PATH: &str = "/oauth/revoke";

/// OAuth scopes requested during authorization, in wire order.
pub const SCOPES: [&str; 5] = [
    "user:read",
    "channel:read",
    "channel:write",
    "chat:write",
    "events:subscribe",
];

/// PKCE challenge method. Only S256 is supported.
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// The scope list joined with single spaces, as sent in the `scope` parameter.
pub fn scope_string() -> String {
    SCOPES.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_string_preserves_order() {
        assert_eq!(
            scope_string(),
            "user:read channel:read channel:write chat:write events:subscribe"
        );
    }
}

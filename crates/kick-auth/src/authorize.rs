//! Authorization URL construction
//!
//! The URL is opened in the user's browser; Kick redirects back to the
//! configured callback with `code` and `state`. The caller must keep the
//! returned `state` and `code_verifier` (e.g. in its session) until the
//! callback arrives.

use common::ClientConfig;
use serde::Serialize;
use url::Url;

use crate::constants::{AUTHORIZE_PATH, CODE_CHALLENGE_METHOD, scope_string};
use crate::error::Result;
use crate::pkce::{generate_pkce, generate_state};

/// A ready-to-redirect authorization URL plus the values needed later.
///
/// The challenge is embedded in `url` and not returned separately.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
}

/// Build the authorize URL with a fresh PKCE pair.
///
/// A supplied non-empty `state` is used verbatim, otherwise a random one is
/// generated. PKCE pairs are never accepted from the caller so the
/// challenge in the URL always matches the returned verifier.
pub fn authorization_url(
    config: &ClientConfig,
    state: Option<&str>,
) -> Result<AuthorizationRequest> {
    let client_id = config.require_client_id()?;
    let redirect_uri = config.require_redirect_uri()?;

    let state = match state {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => generate_state(),
    };
    let pkce = generate_pkce();
    let scope = scope_string();

    let endpoint = format!("{}{AUTHORIZE_PATH}", config.auth_base_url());
    let url = Url::parse_with_params(
        &endpoint,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state.as_str()),
            ("code_challenge", pkce.challenge.as_str()),
            ("code_challenge_method", CODE_CHALLENGE_METHOD),
        ],
    )
    .map_err(|e| common::Error::Config(format!("invalid authorize endpoint {endpoint}: {e}")))?;

    tracing::debug!(endpoint = %endpoint, "built authorization url");

    Ok(AuthorizationRequest {
        url: url.into(),
        state,
        code_verifier: pkce.verifier,
    })
}

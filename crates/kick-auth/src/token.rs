//! OAuth token exchange, refresh and revocation
//!
//! Handles the three token lifecycle interactions:
//! 1. Authorization code exchange (completes the PKCE flow)
//! 2. Token refresh (supersedes the previous token set)
//! 3. Revocation
//!
//! Exchange and refresh POST a form body to `{auth_base_url}/oauth/token`;
//! revocation POSTs query parameters to `{auth_base_url}/oauth/revoke`.
//! Nothing here retries: every failure is logged and returned as-is.

use std::fmt;
use std::str::FromStr;

use common::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::constants::{REVOKE_PATH, TOKEN_PATH};
use crate::error::{Error, Operation, Result};

/// Response from the token endpoint for both exchange and refresh.
///
/// The upstream JSON is kept exactly as received and serializes back to the
/// same value. The accessors read the standard fields without requiring any
/// of them to be present.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TokenSet(serde_json::Value);

impl TokenSet {
    pub fn access_token(&self) -> Option<&str> {
        self.str_field("access_token")
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.str_field("refresh_token")
    }

    pub fn token_type(&self) -> Option<&str> {
        self.str_field("token_type")
    }

    /// Seconds until the access token expires (delta, not absolute)
    pub fn expires_in(&self) -> Option<u64> {
        self.0.get("expires_in").and_then(serde_json::Value::as_u64)
    }

    pub fn scope(&self) -> Option<&str> {
        self.str_field("scope")
    }

    /// Any field of the response, standard or not.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

impl From<serde_json::Value> for TokenSet {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut redacted = self.0.clone();
        if let Some(object) = redacted.as_object_mut() {
            for key in ["access_token", "refresh_token"] {
                if let Some(value) = object.get_mut(key).filter(|v| !v.is_null()) {
                    *value = serde_json::Value::from("[REDACTED]");
                }
            }
        }
        f.debug_tuple("TokenSet").field(&redacted).finish()
    }
}

/// Hint telling the revocation endpoint which kind of token it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTypeHint {
    AccessToken,
    RefreshToken,
}

impl TokenTypeHint {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenTypeHint::AccessToken => "access_token",
            TokenTypeHint::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for TokenTypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenTypeHint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "access_token" => Ok(TokenTypeHint::AccessToken),
            "refresh_token" => Ok(TokenTypeHint::RefreshToken),
            other => Err(Error::Validation(format!(
                "unknown token type hint {other:?}, expected access_token or refresh_token"
            ))),
        }
    }
}

/// Exchange an authorization code for tokens (completes the PKCE flow).
///
/// `code_verifier` must be the verifier returned alongside the authorization
/// URL that produced `code`. Both are checked before any request is made.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &ClientConfig,
    code: &str,
    code_verifier: &str,
) -> Result<TokenSet> {
    require_arg("authorization code", code)?;
    require_arg("code verifier", code_verifier)?;
    let client_id = config.require_client_id()?;
    let redirect_uri = config.require_redirect_uri()?;

    let mut form = vec![("client_id", client_id)];
    if let Some(secret) = config.client_secret() {
        form.push(("client_secret", secret.expose_str()));
    }
    form.extend([
        ("code", code),
        ("grant_type", "authorization_code"),
        ("redirect_uri", redirect_uri),
        ("code_verifier", code_verifier),
    ]);

    let tokens = post_token_form(client, config, Operation::TokenExchange, &form).await?;
    info!(
        token_type = tokens.token_type(),
        expires_in = tokens.expires_in(),
        "authorization code exchanged"
    );
    Ok(tokens)
}

/// Obtain a new token set using a refresh token.
///
/// The refresh token is sent as-is; only emptiness is checked locally.
pub async fn refresh_token(
    client: &reqwest::Client,
    config: &ClientConfig,
    refresh_token: &str,
) -> Result<TokenSet> {
    require_arg("refresh token", refresh_token)?;
    let client_id = config.require_client_id()?;

    let mut form = vec![("client_id", client_id)];
    if let Some(secret) = config.client_secret() {
        form.push(("client_secret", secret.expose_str()));
    }
    form.extend([
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ]);

    let tokens = post_token_form(client, config, Operation::TokenRefresh, &form).await?;
    info!(expires_in = tokens.expires_in(), "access token refreshed");
    Ok(tokens)
}

/// Revoke an access or refresh token.
///
/// Returns `true` on any 2xx; the response body carries no information.
pub async fn revoke_token(
    client: &reqwest::Client,
    config: &ClientConfig,
    token: &str,
    hint: Option<TokenTypeHint>,
) -> Result<bool> {
    require_arg("token", token)?;

    let url = format!("{}{REVOKE_PATH}", config.auth_base_url());
    let mut query = vec![("token", token)];
    if let Some(hint) = hint {
        query.push(("token_hint_type", hint.as_str()));
    }

    debug!(url = %url, hint = ?hint, "revoking token");
    let response = client
        .post(&url)
        .query(&query)
        .send()
        .await
        .map_err(|e| transport_error(Operation::Revocation, e))?;
    check_status(Operation::Revocation, response).await?;

    info!(hint = ?hint, "token revoked");
    Ok(true)
}

async fn post_token_form(
    client: &reqwest::Client,
    config: &ClientConfig,
    operation: Operation,
    form: &[(&str, &str)],
) -> Result<TokenSet> {
    let url = format!("{}{TOKEN_PATH}", config.auth_base_url());
    debug!(url = %url, %operation, "posting to token endpoint");

    let response = client
        .post(&url)
        .form(form)
        .send()
        .await
        .map_err(|e| transport_error(operation, e))?;
    let response = check_status(operation, response).await?;

    response.json::<TokenSet>().await.map_err(|e| {
        error!(%operation, message = %e, "token endpoint returned an unreadable body");
        Error::Decode {
            operation,
            message: e.to_string(),
        }
    })
}

/// Pass 2xx responses through; turn anything else into `Error::Upstream`.
async fn check_status(
    operation: Operation,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(
        %operation,
        status = status.as_u16(),
        body = %body,
        "upstream rejected request"
    );
    Err(Error::Upstream {
        operation,
        status: status.as_u16(),
        body,
    })
}

fn transport_error(operation: Operation, source: reqwest::Error) -> Error {
    error!(
        %operation,
        message = %source,
        timeout = source.is_timeout(),
        "request failed before a response was received"
    );
    Error::Transport { operation, source }
}

fn require_arg(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        warn!(argument = what, "rejected call with missing argument");
        return Err(Error::Validation(format!("{what} is required")));
    }
    Ok(())
}

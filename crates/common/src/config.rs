//! Client configuration resolution
//!
//! Each setting is read from a `_PROD` or `_DEV` suffixed environment
//! variable, selected by `KICK_ENV` (or `NODE_ENV` when that is unset).
//! Base URLs fall back to Kick's public
//! hosts in development only. Credentials never fall back: an unset
//! credential resolves to `None` so callers can tell "missing" apart from
//! "configured empty", and the OAuth operations reject it at first use.

use crate::error::{Error, Result};
use crate::secret::Secret;

/// Variable selecting production mode when set to `production`.
pub const ENVIRONMENT_VAR: &str = "KICK_ENV";

/// Consulted only when `KICK_ENV` is unset.
pub const FALLBACK_ENVIRONMENT_VAR: &str = "NODE_ENV";

pub const API_BASE_URL_VAR: &str = "KICK_API_BASE_URL";
pub const AUTH_BASE_URL_VAR: &str = "KICK_AUTH_BASE_URL";
pub const CLIENT_ID_VAR: &str = "KICK_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "KICK_CLIENT_SECRET";
pub const CALLBACK_URL_VAR: &str = "KICK_CALLBACK_URL";

/// Development default for the REST API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.kick.com";

/// Development default for the OAuth host
pub const DEFAULT_AUTH_BASE_URL: &str = "https://id.kick.com";

/// Deployment mode, selects which suffixed variable family is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Read `KICK_ENV`, then `NODE_ENV`; anything other than `production`
    /// is development.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(ENVIRONMENT_VAR).or_else(|| lookup(FALLBACK_ENVIRONMENT_VAR));
        Self::parse(value.as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    fn suffix(self) -> &'static str {
        match self {
            Environment::Production => "_PROD",
            Environment::Development => "_DEV",
        }
    }

    /// Full variable name for a setting in this environment, e.g. `KICK_CLIENT_ID_DEV`.
    pub fn var_name(self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }
}

/// Immutable per-process client configuration.
///
/// Built once at startup and handed to each client instance; there is no
/// global copy.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    auth_base_url: String,
    client_id: Option<String>,
    client_secret: Option<Secret<String>>,
    redirect_uri: Option<String>,
}

impl ClientConfig {
    /// Explicit construction with no credentials set.
    ///
    /// Both URLs must use an http(s) scheme; a trailing `/` is dropped so
    /// endpoint paths can be appended directly.
    pub fn new(base_url: impl Into<String>, auth_base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url("base_url", base_url.into())?,
            auth_base_url: normalize_base_url("auth_base_url", auth_base_url.into())?,
            client_id: None,
            client_secret: None,
            redirect_uri: None,
        })
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(Secret::new(client_secret.into()));
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(Environment::from_env(), |key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` as the variable source.
    ///
    /// In production a missing base URL is an error since there is no safe
    /// host to fall back to.
    pub fn resolve<F>(environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |base: &str| lookup(&environment.var_name(base));

        let base_url = resolve_base_url(
            environment,
            API_BASE_URL_VAR,
            read(API_BASE_URL_VAR),
            DEFAULT_API_BASE_URL,
        )?;
        let auth_base_url = resolve_base_url(
            environment,
            AUTH_BASE_URL_VAR,
            read(AUTH_BASE_URL_VAR),
            DEFAULT_AUTH_BASE_URL,
        )?;

        Ok(Self {
            base_url,
            auth_base_url,
            client_id: read(CLIENT_ID_VAR),
            client_secret: read(CLIENT_SECRET_VAR).map(Secret::new),
            redirect_uri: read(CALLBACK_URL_VAR),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&Secret<String>> {
        self.client_secret.as_ref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// Client id, or a `Config` error if it is unset or empty.
    pub fn require_client_id(&self) -> Result<&str> {
        require("client id", CLIENT_ID_VAR, self.client_id.as_deref())
    }

    /// Redirect URI, or a `Config` error if it is unset or empty.
    pub fn require_redirect_uri(&self) -> Result<&str> {
        require("redirect URI", CALLBACK_URL_VAR, self.redirect_uri.as_deref())
    }
}

fn require<'a>(what: &str, var: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        None => Err(Error::Config(format!("{what} is not set ({var})"))),
        Some(v) if v.trim().is_empty() => Err(Error::Config(format!("{what} is empty ({var})"))),
        Some(v) => Ok(v),
    }
}

fn resolve_base_url(
    environment: Environment,
    base: &str,
    value: Option<String>,
    default: &str,
) -> Result<String> {
    let name = environment.var_name(base);
    match value.filter(|v| !v.trim().is_empty()) {
        Some(url) => normalize_base_url(&name, url),
        None if environment.is_production() => Err(Error::Config(format!(
            "{name} must be set in production"
        ))),
        None => Ok(default.to_owned()),
    }
}

fn normalize_base_url(name: &str, url: String) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(Error::Config(format!(
            "{name} must start with http:// or https://, got: {url}"
        )));
    }
    Ok(trimmed.to_owned())
}

//! Bearer-authenticated client for the Kick public REST API
//!
//! Every resource method is a single request against a fixed path. Caller
//! parameters are forwarded verbatim and the decoded JSON body is returned
//! untouched. The access token is read once while each request is built,
//! so replacing it never affects a request whose headers already exist.

use std::sync::{PoisonError, RwLock};

use common::{ClientConfig, Secret};
use kick_auth::TokenTypeHint;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};

const TOKEN_PATH: &str = "/oauth/token";
const REVOKE_PATH: &str = "/oauth/revoke";
const INTROSPECT_PATH: &str = "/public/v1/token/introspect";
const USERS_PATH: &str = "/public/v1/users";
const CHANNELS_PATH: &str = "/public/v1/channels";
const CATEGORIES_PATH: &str = "/public/v1/categories";
const CHAT_PATH: &str = "/public/v1/chat";
const EVENT_SUBSCRIPTIONS_PATH: &str = "/public/v1/events/subscriptions";
const PUBLIC_KEY_PATH: &str = "/public/v1/public-key";

/// Parameters for `POST /oauth/token` on the API host.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default)]
pub struct AccessTokenParams {
    pub grant_type: String,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
}

/// Kick REST API client.
///
/// Share it behind an `Arc` to let one task rotate the token while others
/// issue requests.
#[derive(Debug)]
pub struct KickApiClient {
    http: reqwest::Client,
    base_url: String,
    client_id: Option<String>,
    client_secret: Option<Secret<String>>,
    access_token: RwLock<Option<Secret<String>>>,
}

impl KickApiClient {
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url().to_owned(),
            client_id: config.client_id().map(str::to_owned),
            client_secret: config.client_secret().cloned(),
            access_token: RwLock::new(None),
        }
    }

    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.set_access_token(token);
        self
    }

    /// Replace the token used by requests built from now on.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let token = Secret::new(token.into());
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Send subsequent requests unauthenticated.
    pub fn clear_access_token(&self) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn has_access_token(&self) -> bool {
        self.current_token().is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // OAuth

    /// `POST /oauth/token` with the grant in the query string.
    pub async fn get_access_token(&self, params: &AccessTokenParams) -> Result<Value> {
        let mut query: Vec<(&str, &str)> = vec![("grant_type", params.grant_type.as_str())];
        if let Some(client_id) = &self.client_id {
            query.push(("client_id", client_id.as_str()));
        }
        if let Some(secret) = &self.client_secret {
            query.push(("client_secret", secret.expose_str()));
        }
        for (key, value) in [
            ("code", &params.code),
            ("redirect_uri", &params.redirect_uri),
            ("refresh_token", &params.refresh_token),
        ] {
            if let Some(value) = value {
                query.push((key, value.as_str()));
            }
        }
        self.send(Method::POST, TOKEN_PATH, |b| b.query(&query))
            .await
    }

    pub async fn revoke_token(&self, token: &str, hint: Option<TokenTypeHint>) -> Result<Value> {
        let mut query = vec![("token", token)];
        if let Some(hint) = hint {
            query.push(("token_type_hint", hint.as_str()));
        }
        self.send(Method::POST, REVOKE_PATH, |b| b.query(&query))
            .await
    }

    pub async fn introspect_token(&self) -> Result<Value> {
        self.send(Method::POST, INTROSPECT_PATH, |b| b).await
    }

    // Users

    pub async fn get_users(&self, user_ids: &[u64]) -> Result<Value> {
        let query = repeated("id[]", user_ids);
        self.send(Method::GET, USERS_PATH, |b| b.query(&query)).await
    }

    // Channels

    pub async fn get_channels(&self, broadcaster_user_ids: &[u64]) -> Result<Value> {
        let query = repeated("broadcaster_user_id[]", broadcaster_user_ids);
        self.send(Method::GET, CHANNELS_PATH, |b| b.query(&query))
            .await
    }

    pub async fn update_channel<T: Serialize + ?Sized>(&self, params: &T) -> Result<Value> {
        self.send(Method::PATCH, CHANNELS_PATH, |b| b.json(params))
            .await
    }

    // Categories

    pub async fn get_categories(&self, query: &str) -> Result<Value> {
        self.send(Method::GET, CATEGORIES_PATH, |b| b.query(&[("q", query)]))
            .await
    }

    pub async fn get_category(&self, category_id: u64) -> Result<Value> {
        let path = format!("{CATEGORIES_PATH}/{category_id}");
        self.send(Method::GET, &path, |b| b).await
    }

    // Chat

    pub async fn send_chat_message<T: Serialize + ?Sized>(&self, params: &T) -> Result<Value> {
        self.send(Method::POST, CHAT_PATH, |b| b.json(params)).await
    }

    // Event subscriptions

    pub async fn get_event_subscriptions(&self) -> Result<Value> {
        self.send(Method::GET, EVENT_SUBSCRIPTIONS_PATH, |b| b).await
    }

    pub async fn create_event_subscriptions<T: Serialize + ?Sized>(
        &self,
        params: &T,
    ) -> Result<Value> {
        self.send(Method::POST, EVENT_SUBSCRIPTIONS_PATH, |b| b.json(params))
            .await
    }

    pub async fn delete_event_subscriptions(&self, subscription_ids: &[&str]) -> Result<Value> {
        let query = repeated("id[]", subscription_ids);
        self.send(Method::DELETE, EVENT_SUBSCRIPTIONS_PATH, |b| {
            b.query(&query)
        })
        .await
    }

    // Public key

    pub async fn get_public_key(&self) -> Result<Value> {
        self.send(Method::GET, PUBLIC_KEY_PATH, |b| b).await
    }

    fn current_token(&self) -> Option<Secret<String>> {
        let guard = self
            .access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Build the request with the current token (if any), send it and
    /// decode the body. Failures are logged here and returned unchanged.
    async fn send<F>(&self, method: Method, path: &str, build: F) -> Result<Value>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let endpoint = format!("{method} {path}");
        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.current_token() {
            request = request.bearer_auth(token.expose_str());
        }
        let request = build(request);

        debug!(endpoint = %endpoint, "sending kick api request");
        let response = request
            .send()
            .await
            .map_err(|source| transport_error(&endpoint, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                body = %body,
                "kick api error"
            );
            return Err(Error::Upstream {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| transport_error(&endpoint, source))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(endpoint = %endpoint, message = %e, "kick api returned invalid json");
            Error::Decode {
                endpoint,
                message: e.to_string(),
            }
        })
    }
}

fn repeated<'a, T: ToString>(key: &'a str, values: &[T]) -> Vec<(&'a str, String)> {
    values.iter().map(|v| (key, v.to_string())).collect()
}

fn transport_error(endpoint: &str, source: reqwest::Error) -> Error {
    error!(
        endpoint = %endpoint,
        message = %source,
        timeout = source.is_timeout(),
        "kick api request failed before a response was received"
    );
    Error::Transport {
        endpoint: endpoint.to_owned(),
        source,
    }
}

//! Stateful facade over the OAuth operations
//!
//! Holds the HTTP client and configuration so callers don't thread both
//! through every call. Holds no token state: the caller owns the state,
//! verifier and token sets it receives.

use common::ClientConfig;

use crate::authorize::{AuthorizationRequest, authorization_url};
use crate::error::Result;
use crate::token::{self, TokenSet, TokenTypeHint};

/// OAuth client for one configured Kick application.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl OAuthClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a caller-built HTTP client (timeouts, proxies, TLS settings).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the authorize URL; see [`authorization_url`].
    pub fn authorization_url(&self, state: Option<&str>) -> Result<AuthorizationRequest> {
        authorization_url(&self.config, state)
    }

    /// Exchange an authorization code plus its PKCE verifier for tokens.
    pub async fn get_tokens(&self, code: &str, code_verifier: &str) -> Result<TokenSet> {
        token::exchange_code(&self.http, &self.config, code, code_verifier).await
    }

    pub async fn refresh_token_access(&self, refresh_token: &str) -> Result<TokenSet> {
        token::refresh_token(&self.http, &self.config, refresh_token).await
    }

    pub async fn revoke_token(&self, token: &str, hint: Option<TokenTypeHint>) -> Result<bool> {
        token::revoke_token(&self.http, &self.config, token, hint).await
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::mock;
    use crate::pkce::compute_challenge;

    fn client(auth_base_url: &str) -> OAuthClient {
        let config = ClientConfig::new("http://127.0.0.1:1", auth_base_url)
            .unwrap()
            .with_client_id("client-123")
            .with_redirect_uri("https://app.example/callback");
        OAuthClient::new(config)
    }

    #[tokio::test]
    async fn full_flow_uses_verifier_from_authorization_request() {
        let (url, log) = mock::start(
            StatusCode::OK,
            r#"{"access_token":"at","refresh_token":"rt","token_type":"Bearer","expires_in":600}"#,
        )
        .await;
        let client = client(&url);

        let request = client.authorization_url(None).unwrap();
        let challenge = url::Url::parse(&request.url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "code_challenge")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        let tokens = client
            .get_tokens("code-from-callback", &request.code_verifier)
            .await
            .unwrap();
        assert_eq!(tokens.access_token(), Some("at"));

        let requests = log.lock().unwrap();
        let sent_verifier = &requests[0].form["code_verifier"];
        assert_eq!(compute_challenge(sent_verifier), challenge);
    }

    #[tokio::test]
    async fn refresh_then_revoke() {
        let (url, log) = mock::start(
            StatusCode::OK,
            r#"{"access_token":"at2","token_type":"Bearer","expires_in":600}"#,
        )
        .await;
        let client = client(&url);

        let tokens = client.refresh_token_access("rt").await.unwrap();
        assert_eq!(tokens.access_token(), Some("at2"));
        assert!(tokens.refresh_token().is_none());

        assert!(
            client
                .revoke_token(tokens.access_token().unwrap(), Some(TokenTypeHint::AccessToken))
                .await
                .unwrap()
        );

        let paths: Vec<String> = log.lock().unwrap().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec!["/oauth/token", "/oauth/revoke"]);
    }
}

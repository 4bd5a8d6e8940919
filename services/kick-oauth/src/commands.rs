//! Command execution
//!
//! Each command maps to one library call and yields the JSON printed on
//! stdout.

use anyhow::{Context, Result};
use common::ClientConfig;
use kick_api::KickApiClient;
use kick_auth::OAuthClient;
use serde_json::{Value, json};
use tracing::info;

use crate::cli::Command;

pub async fn run(command: Command, config: ClientConfig, http: reqwest::Client) -> Result<Value> {
    match command {
        Command::Authorize { state } => {
            let oauth = OAuthClient::with_http_client(config, http);
            let request = oauth
                .authorization_url(state.as_deref())
                .context("failed to build authorization url")?;
            info!("authorization url ready, store state and code_verifier for the callback");
            Ok(serde_json::to_value(request)?)
        }
        Command::Exchange { code, verifier } => {
            let oauth = OAuthClient::with_http_client(config, http);
            let tokens = oauth
                .get_tokens(&code, &verifier)
                .await
                .context("authorization code exchange failed")?;
            Ok(serde_json::to_value(tokens)?)
        }
        Command::Refresh { refresh_token } => {
            let oauth = OAuthClient::with_http_client(config, http);
            let tokens = oauth
                .refresh_token_access(&refresh_token)
                .await
                .context("token refresh failed")?;
            Ok(serde_json::to_value(tokens)?)
        }
        Command::Revoke { token, hint } => {
            let oauth = OAuthClient::with_http_client(config, http);
            let revoked = oauth
                .revoke_token(&token, hint.map(Into::into))
                .await
                .context("token revocation failed")?;
            Ok(json!({ "revoked": revoked }))
        }
        Command::Introspect { access_token } => {
            let api = KickApiClient::new(http, &config).with_access_token(access_token);
            api.introspect_token()
                .await
                .context("token introspection failed")
        }
        Command::Users { access_token, ids } => {
            let api = KickApiClient::new(http, &config).with_access_token(access_token);
            api.get_users(&ids).await.context("fetching users failed")
        }
    }
}

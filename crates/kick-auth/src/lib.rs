//! Kick OAuth authentication library
//!
//! Provides the Authorization Code + PKCE flow against Kick's OAuth server:
//! state/verifier generation, authorization URL construction, code
//! exchange, refresh and revocation. Stateless between calls; the caller
//! persists `state`, the verifier and token sets.
//!
//! Flow:
//! 1. Application calls `authorization_url()` and stores `state` + `code_verifier`
//! 2. User authorizes in the browser, Kick redirects with `code` and `state`
//! 3. Application checks `state` and calls `exchange_code()` with the verifier
//! 4. `refresh_token()` before expiry, `revoke_token()` on logout

pub mod authorize;
pub mod client;
pub mod constants;
pub mod error;
pub mod pkce;
pub mod token;

#[cfg(test)]
mod mock;

pub use authorize::{AuthorizationRequest, authorization_url};
pub use client::OAuthClient;
pub use constants::*;
pub use error::{Error, Operation, Result};
pub use pkce::{PkcePair, compute_challenge, generate_pkce, generate_state};
pub use token::{TokenSet, TokenTypeHint, exchange_code, refresh_token, revoke_token};

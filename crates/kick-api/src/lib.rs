//! Kick public REST API client
//!
//! Thin, bearer-authenticated wrappers over the Kick public API. Obtain an
//! access token with `kick-auth`, hand it to `KickApiClient::set_access_token`,
//! then call the resource methods. Responses are returned as raw JSON.

pub mod client;
pub mod error;

pub use client::{AccessTokenParams, KickApiClient};
pub use error::{Error, Result};

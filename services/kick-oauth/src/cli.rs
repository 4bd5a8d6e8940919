//! Command-line arguments

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use kick_auth::TokenTypeHint;

#[derive(Debug, Parser)]
#[command(name = "kick-oauth")]
#[command(about = "Drive the Kick OAuth 2.0 Authorization Code + PKCE flow")]
#[command(version)]
pub struct Cli {
    /// Per-request timeout for the HTTP client, in seconds
    #[arg(
        long,
        global = true,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the authorization URL plus the state and verifier to keep
    Authorize {
        /// Use this state instead of generating one
        #[arg(long)]
        state: Option<String>,
    },

    /// Exchange an authorization code for tokens
    Exchange {
        #[arg(long)]
        code: String,

        /// Code verifier printed by `authorize`
        #[arg(long)]
        verifier: String,
    },

    /// Refresh an access token
    Refresh {
        #[arg(long)]
        refresh_token: String,
    },

    /// Revoke an access or refresh token
    Revoke {
        #[arg(long)]
        token: String,

        #[arg(long, value_enum)]
        hint: Option<HintArg>,
    },

    /// Introspect an access token
    Introspect {
        #[arg(long)]
        access_token: String,
    },

    /// Fetch users (the token's own user when no --id is given)
    Users {
        #[arg(long)]
        access_token: String,

        #[arg(long = "id")]
        ids: Vec<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum HintArg {
    AccessToken,
    RefreshToken,
}

impl From<HintArg> for TokenTypeHint {
    fn from(hint: HintArg) -> Self {
        match hint {
            HintArg::AccessToken => TokenTypeHint::AccessToken,
            HintArg::RefreshToken => TokenTypeHint::RefreshToken,
        }
    }
}

//! Error types for OAuth operations

use std::fmt;

/// Which token-endpoint interaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    TokenExchange,
    TokenRefresh,
    Revocation,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::TokenExchange => "token exchange",
            Operation::TokenRefresh => "token refresh",
            Operation::Revocation => "token revocation",
        })
    }
}

/// Errors from OAuth operations.
///
/// `Configuration` and `Validation` are raised before any request is sent.
/// `Upstream` means the endpoint answered with a non-2xx status; `Transport`
/// means no response arrived at all (connect failure, timeout, abort).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] common::Error),

    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("{operation} failed: upstream returned {status}: {body}")]
    Upstream {
        operation: Operation,
        status: u16,
        body: String,
    },

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned an invalid response: {message}")]
    Decode { operation: Operation, message: String },
}

impl Error {
    /// Upstream HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream response body, when one was received and non-empty.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Upstream { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// Upstream body parsed as JSON, if it is JSON.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body().and_then(|b| serde_json::from_str(b).ok())
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Upstream { operation, .. }
            | Error::Transport { operation, .. }
            | Error::Decode { operation, .. } => Some(*operation),
            Error::Configuration(_) | Error::Validation(_) => None,
        }
    }

    /// Whether the request never got a response (network, timeout, abort).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;

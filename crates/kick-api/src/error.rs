//! Error types for REST API calls

/// Errors from Kick REST API calls.
///
/// The upstream status and body are kept verbatim; nothing is retried or
/// translated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{endpoint}: upstream returned {status}: {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: invalid response body: {message}")]
    Decode { endpoint: String, message: String },
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Upstream { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// `METHOD path` of the call that failed.
    pub fn endpoint(&self) -> &str {
        match self {
            Error::Upstream { endpoint, .. }
            | Error::Transport { endpoint, .. }
            | Error::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, Error>;

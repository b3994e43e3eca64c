//! Client error type.

use thiserror::Error;

use frostbites_core::ValidationError;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never got a response (connection refused, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body was not what the endpoint returns.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A form failed local validation and was never sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation needs a session token and none is stored.
    #[error("Not signed in")]
    MissingToken,
}

impl ClientError {
    /// Status code of a rejection, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server refused the session token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401 | 403, .. } | Self::MissingToken)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

//! Error types
//!
//! Every fallible operation in the crate reports an [`Error`]. Transport failures,
//! non-success statuses and decode failures share this one channel; a missing
//! hyperlink has its own kind so pagination callers can tell "no more pages" apart
//! from a failed request.

use reqwest::StatusCode;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the API client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the body could not be read
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed: {status}{}", message_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// The response body was not the JSON shape we expected
    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A hyperlink with the given relation was not present
    #[error("Could not find a '{0}' link")]
    NoSuchLink(String),

    /// A hyperlink pointed outside the configured API root
    #[error("Link '{0}' does not start with the configured base URL")]
    ForeignLink(String),

    /// The request URL could not be built
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

/// Fieldless view of [`Error`] for matching on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
    NoSuchLink,
    ForeignLink,
    Url,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Status { .. } => ErrorKind::Status,
            Error::Decode(_) => ErrorKind::Decode,
            Error::NoSuchLink(_) => ErrorKind::NoSuchLink,
            Error::ForeignLink(_) => ErrorKind::ForeignLink,
            Error::Url(_) => ErrorKind::Url,
        }
    }

    /// True when the error only says that a relation was not linked
    pub fn is_no_such_link(&self) -> bool {
        self.kind() == ErrorKind::NoSuchLink
    }

    /// HTTP status of the failed request, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }
}

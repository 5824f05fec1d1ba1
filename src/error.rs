//! Error kinds for local validation and remote calls
//!
//! Some failures are intentionally absorbed rather than shown (a failed completion toggle, a corrupt preference file). \
//! They still go through these typed values, so callers and tests can observe what happened.

use thiserror::Error;

/// An error coming from the remote source, or from the transport to it
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The server answered with a non-success status code.
    /// `message` holds the response body, when the server sent one
    #[error("the server answered HTTP {status}")]
    Api { status: u16, message: Option<String> },

    /// The request did not complete (connection refused, timeout...)
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source refused to serve this call (used by mocked sources)
    #[error("the remote source is unavailable: {0}")]
    Unavailable(String),
}

impl RemoteError {
    /// The human-readable message to surface: the response body when the server
    /// provided one, the raw error otherwise
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Api { message: Some(body), .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

/// Any error this crate reports to its callers
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected locally: a task description must contain something once trimmed.
    /// The remote source is never contacted for such a request
    #[error("a task description must not be empty")]
    EmptyDescription,

    /// Rejected locally: the sign-up form data does not pass validation
    #[error("invalid sign-up data: {0}")]
    InvalidSignUp(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl Error {
    /// Whether this error was raised before any network access
    pub fn is_local_validation(&self) -> bool {
        match self {
            Error::EmptyDescription | Error::InvalidSignUp(_) => true,
            Error::Remote(_) => false,
        }
    }
}

use std::error::Error as StdError;
use std::fmt::Write as _;

use thiserror::Error;

/// Coarse classification of a per-request failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    Build,
    Connect,
    Transport,
    Timeout,
    Cancelled,
    BodyRead,
}

impl RequestErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RequestErrorKind::Build => "build",
            RequestErrorKind::Connect => "connect",
            RequestErrorKind::Transport => "transport",
            RequestErrorKind::Timeout => "timeout",
            RequestErrorKind::Cancelled => "cancelled",
            RequestErrorKind::BodyRead => "body-read",
        }
    }
}

/// Terminal error of a single request.
///
/// Carried by value in both the response and the `failed` progress event, so
/// the underlying transport error is flattened into its message chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("failed to build request: {message}")]
    Build { message: String },
    #[error("connection failed: {message}")]
    Connect { message: String },
    #[error("request failed: {message}")]
    Transport { message: String },
    #[error("deadline exceeded")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("failed to read response body: {message}")]
    BodyRead { message: String },
}

impl RequestError {
    #[must_use]
    pub const fn kind(&self) -> RequestErrorKind {
        match self {
            RequestError::Build { .. } => RequestErrorKind::Build,
            RequestError::Connect { .. } => RequestErrorKind::Connect,
            RequestError::Transport { .. } => RequestErrorKind::Transport,
            RequestError::Timeout => RequestErrorKind::Timeout,
            RequestError::Cancelled => RequestErrorKind::Cancelled,
            RequestError::BodyRead { .. } => RequestErrorKind::BodyRead,
        }
    }

    /// True for failures caused by the shared run scope (deadline or cancel).
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, RequestError::Timeout | RequestError::Cancelled)
    }

    pub(crate) fn from_send(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            return RequestError::Build {
                message: describe(err),
            };
        }
        if err.is_timeout() {
            return RequestError::Timeout;
        }
        if err.is_connect() {
            return RequestError::Connect {
                message: describe(err),
            };
        }
        RequestError::Transport {
            message: describe(err),
        }
    }

    pub(crate) fn from_body(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return RequestError::Timeout;
        }
        RequestError::BodyRead {
            message: describe(err),
        }
    }
}

fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            drop(write!(message, ": {}", text));
        }
        source = cause.source();
    }
    message
}

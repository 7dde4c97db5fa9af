use reqwest::StatusCode;
use serde::Deserialize;

/// Every failure a DAL call can surface.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("request timed out, please try again")]
    TimedOut,
    #[error("your session has expired, please log in again")]
    SessionExpired,
    #[error("resource not found")]
    NotFound,
    #[error("{message} (status {status})")]
    RemoteRejected { status: u16, message: String },
    #[error("cannot reach the server: {0}")]
    Unreachable(String),
    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    /// 5xx answers, the only ones the delete policy retries.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::RemoteRejected { status, .. } if *status >= 500)
    }

    /// Failures where the request may never have reached the backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Unreachable(_))
    }

    /// Classifies a failure to obtain any response.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else {
            Self::Unreachable(err.to_string())
        }
    }

    /// Classifies a failure while reading a successful response body.
    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else {
            Self::Unknown(format!("invalid response body: {err}"))
        }
    }

    pub(crate) fn from_status(status: StatusCode, message: Option<String>, op: &Operation) -> Self {
        match status.as_u16() {
            401 => Self::SessionExpired,
            404 if op.not_found => Self::NotFound,
            code => Self::RemoteRejected {
                status: code,
                message: message.unwrap_or_else(|| op.fallback.to_string()),
            },
        }
    }
}

/// Error body sent by the backend, Spring style.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        let non_empty = |s: &String| !s.trim().is_empty();
        self.message
            .filter(non_empty)
            .or(self.error.filter(non_empty))
    }
}

/// Per-call facts used for logging and for status classification.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Operation {
    pub(crate) name: &'static str,
    pub(crate) fallback: &'static str,
    /// Whether a 404 means the target is missing (`NotFound`) rather than a
    /// plain rejection.
    pub(crate) not_found: bool,
}

impl Operation {
    pub(crate) const fn new(name: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            fallback,
            not_found: true,
        }
    }

    pub(crate) const fn without_not_found(self) -> Self {
        Self {
            not_found: false,
            ..self
        }
    }
}

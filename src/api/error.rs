use std::fmt;

/// Errors produced by a call to the chatbot API.
///
/// Every variant is recoverable: the session controller turns a failed chat
/// call into an in-conversation error message, and a failed health probe is
/// only logged.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// The HTTP client could not be built (bad base URL, TLS setup).
    Config(String),
    /// The request did not settle within the client timeout.
    Timeout,
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-2xx status.
    /// `detail` carries the server-provided explanation, if any.
    Status { status: u16, detail: Option<String> },
    /// The response body did not match the expected shape.
    Decode(String),
}

impl RemoteError {
    /// The server-provided detail string, used verbatim as user-facing error text.
    pub fn detail(&self) -> Option<&str> {
        match self {
            RemoteError::Status {
                detail: Some(detail),
                ..
            } => Some(detail.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Config(msg) => write!(f, "client config error: {msg}"),
            RemoteError::Timeout => write!(f, "request timed out"),
            RemoteError::Network(msg) => write!(f, "network error: {msg}"),
            RemoteError::Status { status, detail } => match detail {
                Some(detail) => write!(f, "API error (HTTP {status}): {detail}"),
                None => write!(f, "API error (HTTP {status})"),
            },
            RemoteError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Decode(e.to_string())
        } else if e.is_builder() {
            RemoteError::Config(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

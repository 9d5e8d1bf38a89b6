//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure raised by a chat, AI or ticket capability.
///
/// `kind` names the failure the way the transport sees it (`ConnectTimeout`,
/// `ConnectError`, `HttpStatusError`, ...). The classifier only looks at the
/// kind name and the attached status; `detail` is for logs and never shown
/// to chat users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct CapabilityError {
    kind: String,
    status_code: Option<u16>,
    detail: String,
}

impl CapabilityError {
    pub fn new(kind: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            status_code: None,
            detail: detail.into(),
        }
    }

    /// Error carrying an HTTP status from the upstream response
    pub fn http_status(status: u16, detail: impl Into<String>) -> Self {
        Self::new("HttpStatusError", detail).with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<reqwest::Error> for CapabilityError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            if err.is_connect() {
                "ConnectTimeout"
            } else {
                "ReadTimeout"
            }
        } else if err.is_connect() {
            "ConnectError"
        } else if err.is_status() {
            "HttpStatusError"
        } else if err.is_decode() {
            "DecodeError"
        } else {
            "RequestError"
        };

        let mut out = Self::new(kind, err.to_string());
        if let Some(status) = err.status() {
            out.status_code = Some(status.as_u16());
        }
        out
    }
}

/// Result type for capability calls
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

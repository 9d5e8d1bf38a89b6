//! Error classifier - Maps capability failures to sanitized chat replies

use serde::Serialize;
use std::fmt;

use crate::application::errors::CapabilityError;

/// Category of a user-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Timeout,
    Unavailable,
    #[serde(rename = "upstream_5xx")]
    Upstream5xx,
    Auth,
    NotFound,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::Upstream5xx => "upstream_5xx",
            ErrorCategory::Auth => "auth",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitized description of a failure, safe to show in chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFacingError {
    pub message: String,
    pub category: ErrorCategory,
    pub retryable: bool,
    #[serde(skip)]
    context: String,
}

impl UserFacingError {
    fn new(context: &str, category: ErrorCategory, retryable: bool, message: String) -> Self {
        Self {
            message,
            category,
            retryable,
            context: context.to_string(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Log the classified failure together with the raw error.
    ///
    /// The raw error only goes to the log, never into `message`.
    pub fn report(&self, raw: &CapabilityError) {
        if self.retryable {
            tracing::warn!(
                context = %self.context,
                category = %self.category,
                retryable = self.retryable,
                error = %raw,
                "Capability call failed"
            );
        } else {
            tracing::error!(
                context = %self.context,
                category = %self.category,
                retryable = self.retryable,
                error = %raw,
                "Capability call failed"
            );
        }
    }
}

/// Classify a capability failure.
///
/// Looks at the error kind name first, then at an attached HTTP status.
/// Message text of the error is never inspected.
pub fn classify(error: &CapabilityError, context: &str) -> UserFacingError {
    let kind = error.kind().to_lowercase();

    if kind.contains("timeout") {
        return UserFacingError::new(
            context,
            ErrorCategory::Timeout,
            true,
            format!("{context} timed out. Please try again."),
        );
    }

    // "connect" also covers "connection"
    if kind.contains("connect") {
        return UserFacingError::new(
            context,
            ErrorCategory::Unavailable,
            true,
            format!("{context} is unavailable right now. Please try again soon."),
        );
    }

    match error.status_code() {
        Some(500..=599) => UserFacingError::new(
            context,
            ErrorCategory::Upstream5xx,
            true,
            format!("{context} is temporarily unavailable (upstream error). Please try again soon."),
        ),
        Some(401 | 403) => UserFacingError::new(
            context,
            ErrorCategory::Auth,
            false,
            format!("{context} rejected the request (auth/permissions). Check credentials."),
        ),
        Some(404) => UserFacingError::new(
            context,
            ErrorCategory::NotFound,
            false,
            format!("{context} endpoint was not found (404). Check configuration."),
        ),
        _ => UserFacingError::new(
            context,
            ErrorCategory::Unknown,
            true,
            format!("{context} failed due to an unexpected error. Please try again."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_by_kind_name() {
        let err = CapabilityError::new("ConnectionTimeout", "socket stalled after 30s");
        let out = classify(&err, "AI service");
        assert_eq!(out.category, ErrorCategory::Timeout);
        assert!(out.retryable);
        assert_eq!(out.message, "AI service timed out. Please try again.");
    }

    #[test]
    fn test_timeout_wins_over_status() {
        let err = CapabilityError::new("ReadTimeout", "x").with_status(404);
        assert_eq!(classify(&err, "Slack").category, ErrorCategory::Timeout);
    }

    #[test]
    fn test_connect_errors_are_unavailable() {
        for kind in ["ConnectError", "ConnectionRefused", "connection_reset"] {
            let out = classify(&CapabilityError::new(kind, "refused"), "Slack");
            assert_eq!(out.category, ErrorCategory::Unavailable);
            assert!(out.retryable);
            assert_eq!(out.message, "Slack is unavailable right now. Please try again soon.");
        }
    }

    #[test]
    fn test_upstream_5xx() {
        for status in [500, 502, 503, 599] {
            let out = classify(&CapabilityError::http_status(status, "boom"), "AI service");
            assert_eq!(out.category, ErrorCategory::Upstream5xx);
            assert!(out.retryable);
        }
    }

    #[test]
    fn test_auth_statuses() {
        for status in [401, 403] {
            let out = classify(&CapabilityError::http_status(status, "denied"), "Slack");
            assert_eq!(out.category, ErrorCategory::Auth);
            assert!(!out.retryable);
            assert_eq!(
                out.message,
                "Slack rejected the request (auth/permissions). Check credentials."
            );
        }
    }

    #[test]
    fn test_not_found() {
        let err = CapabilityError::http_status(404, "no such route");
        let out = classify(&err, "Ticket service");
        assert_eq!(out.category, ErrorCategory::NotFound);
        assert!(!out.retryable);
        assert!(out.message.contains("404"));
        assert_eq!(out.context(), "Ticket service");
    }

    #[test]
    fn test_fallback_is_unknown() {
        let out = classify(&CapabilityError::http_status(400, "bad"), "AI service");
        assert_eq!(out.category, ErrorCategory::Unknown);
        assert!(out.retryable);

        let out = classify(&CapabilityError::new("ParseError", "eof"), "AI service");
        assert_eq!(
            out.message,
            "AI service failed due to an unexpected error. Please try again."
        );
    }

    #[test]
    fn test_message_never_contains_raw_detail() {
        let err = CapabilityError::http_status(500, "Traceback: secret-token-abc");
        let out = classify(&err, "AI service");
        assert!(!out.message.contains("secret-token-abc"));
        assert!(!out.message.contains("Traceback"));
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_value(ErrorCategory::Upstream5xx).unwrap();
        assert_eq!(json, serde_json::json!("upstream_5xx"));
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
    }
}

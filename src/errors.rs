//! Webhook verification error types.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Which of the two webhook headers was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookHeader {
    Signature,
    Timestamp,
}

impl WebhookHeader {
    /// Wire name of the header.
    pub fn name(self) -> &'static str {
        match self {
            WebhookHeader::Signature => crate::SIGNATURE_HEADER,
            WebhookHeader::Timestamp => crate::TIMESTAMP_HEADER,
        }
    }
}

impl fmt::Display for WebhookHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookHeader::Signature => f.write_str("signature"),
            WebhookHeader::Timestamp => f.write_str("timestamp"),
        }
    }
}

/// Reasons a webhook request is rejected.
///
/// Everything except [`WebhookError::Configuration`] is a client-side
/// failure answered with 401. The timestamp variants collapse into the same
/// public message as a signature mismatch; only logs see the difference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("Missing {0} header")]
    MissingHeader(WebhookHeader),

    /// Empty field or a timestamp that is not an ISO-8601 instant.
    #[error("Malformed webhook timestamp or empty field")]
    MalformedTimestamp,

    /// Timestamp parsed but falls outside the tolerance window.
    #[error("Webhook timestamp outside tolerance window")]
    StaleTimestamp,

    #[error("Invalid webhook signature")]
    SignatureMismatch,

    /// The deployment has no usable signing secret.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl WebhookError {
    /// Stable label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookError::MissingHeader(_) => "missing_header",
            WebhookError::MalformedTimestamp => "malformed_timestamp",
            WebhookError::StaleTimestamp => "stale_timestamp",
            WebhookError::SignatureMismatch => "signature_mismatch",
            WebhookError::Configuration(_) => "configuration_error",
        }
    }

    /// Message safe to hand back to the caller.
    pub fn client_message(&self) -> String {
        match self {
            WebhookError::MissingHeader(header) => format!("Missing {header} header"),
            WebhookError::MalformedTimestamp
            | WebhookError::StaleTimestamp
            | WebhookError::SignatureMismatch => "Invalid webhook signature".to_string(),
            WebhookError::Configuration(_) => "Webhook verification is not configured".to_string(),
        }
    }

    /// True for failures caused by the deployment rather than the sender.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, WebhookError::Configuration(_))
    }
}

impl ResponseError for WebhookError {
    fn status_code(&self) -> StatusCode {
        if self.is_server_fault() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::UNAUTHORIZED
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.client_message(),
        })
    }
}

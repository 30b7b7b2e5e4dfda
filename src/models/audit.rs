//! Audit records for webhook verification attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MatchedSecret;
use crate::errors::WebhookError;

/// Outcome of a verification attempt as recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventOutcome {
    Accepted,
    Rejected,
}

/// Structured audit entry for one webhook verification attempt.
///
/// Never carries secrets, the presented signature or the expected digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAuditEvent {
    pub outcome: WebhookEventOutcome,
    /// Rejection label from [`WebhookError::kind`], `None` when accepted.
    pub reason: Option<String>,
    pub matched_secret: Option<MatchedSecret>,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub method: String,
    pub endpoint: String,
}

impl WebhookAuditEvent {
    pub fn accepted(matched_secret: MatchedSecret) -> Self {
        Self::new(WebhookEventOutcome::Accepted, None, Some(matched_secret))
    }

    pub fn rejected(error: &WebhookError) -> Self {
        Self::new(
            WebhookEventOutcome::Rejected,
            Some(error.kind().to_string()),
            None,
        )
    }

    fn new(
        outcome: WebhookEventOutcome,
        reason: Option<String>,
        matched_secret: Option<MatchedSecret>,
    ) -> Self {
        Self {
            outcome,
            reason,
            matched_secret,
            timestamp: Utc::now(),
            ip_address: "unknown".to_string(),
            user_agent: None,
            method: String::new(),
            endpoint: String::new(),
        }
    }

    /// Attach request details
    pub fn with_request(mut self, method: &str, endpoint: &str) -> Self {
        self.method = method.to_string();
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_ip_address(mut self, ip_address: String) -> Self {
        self.ip_address = ip_address;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

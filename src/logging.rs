//! Logging for verification outcomes.
//!
//! The authenticator reports through a [`VerificationLogger`] so hosts can
//! route audit events wherever they like. [`NoopLogger`] is the default;
//! [`TracingLogger`] forwards to `tracing` under the `webhook_audit` target.

use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use crate::models::WebhookAuditEvent;

/// Sink for webhook verification audit events.
pub trait VerificationLogger: Send + Sync {
    /// Successful verification.
    fn debug(&self, event: &WebhookAuditEvent);
    /// Request rejected because of something the sender did.
    fn warn(&self, event: &WebhookAuditEvent);
    /// Request rejected because the deployment is misconfigured.
    fn error(&self, event: &WebhookAuditEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl VerificationLogger for NoopLogger {
    fn debug(&self, _event: &WebhookAuditEvent) {}
    fn warn(&self, _event: &WebhookAuditEvent) {}
    fn error(&self, _event: &WebhookAuditEvent) {}
}

/// Emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl VerificationLogger for TracingLogger {
    fn debug(&self, event: &WebhookAuditEvent) {
        debug!(
            target: "webhook_audit",
            outcome = ?event.outcome,
            matched_secret = ?event.matched_secret,
            ip_address = %event.ip_address,
            method = %event.method,
            endpoint = %event.endpoint,
            "Webhook signature verified"
        );
    }

    fn warn(&self, event: &WebhookAuditEvent) {
        warn!(
            target: "webhook_audit",
            outcome = ?event.outcome,
            reason = ?event.reason,
            timestamp = %event.timestamp,
            ip_address = %event.ip_address,
            user_agent = ?event.user_agent,
            method = %event.method,
            endpoint = %event.endpoint,
            "Webhook request rejected"
        );
    }

    fn error(&self, event: &WebhookAuditEvent) {
        error!(
            target: "webhook_audit",
            outcome = ?event.outcome,
            reason = ?event.reason,
            method = %event.method,
            endpoint = %event.endpoint,
            "Webhook configuration error: no signing secret configured"
        );
    }
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
}

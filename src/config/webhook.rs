//! Webhook verification configuration.

use std::{env, time::Duration};

use crate::{models::SecretSet, utils::hmac::DEFAULT_TIMESTAMP_TOLERANCE};

/// Secrets and tolerance for verifying inbound webhooks.
///
/// Treated as immutable once handed to a [`crate::RequestAuthenticator`].
#[derive(Clone, Default)]
pub struct WebhookConfig {
    /// Primary signing secret. Empty means the deployment is misconfigured.
    pub secret: String,
    /// Previous secret, accepted while a rotation is in progress.
    pub secondary_secret: Option<String>,
    /// Allowed clock skew; `None` means the 5 minute default.
    pub timestamp_tolerance: Option<Duration>,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"[REDACTED]")
            .field(
                "secondary_secret",
                &self.secondary_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timestamp_tolerance", &self.timestamp_tolerance)
            .finish()
    }
}

impl WebhookConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_secondary_secret(mut self, secret: impl Into<String>) -> Self {
        self.secondary_secret = Some(secret.into());
        self
    }

    pub fn with_timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = Some(tolerance);
        self
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let secret = env::var("WEBHOOK_SECRET").unwrap_or_default();

        let secondary_secret = env::var("WEBHOOK_SECONDARY_SECRET")
            .ok()
            .filter(|v| !v.is_empty());

        let timestamp_tolerance = env::var("WEBHOOK_TIMESTAMP_TOLERANCE")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);

        Self {
            secret,
            secondary_secret,
            timestamp_tolerance,
        }
    }

    /// Effective tolerance window.
    pub fn tolerance(&self) -> Duration {
        self.timestamp_tolerance.unwrap_or(DEFAULT_TIMESTAMP_TOLERANCE)
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Borrowed view of the configured secrets.
    pub fn secrets(&self) -> SecretSet<'_> {
        SecretSet::new(self.secret.as_bytes())
            .with_secondary(self.secondary_secret.as_deref().map(str::as_bytes))
    }
}

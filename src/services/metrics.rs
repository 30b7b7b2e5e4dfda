//! Prometheus counters for webhook verification.

use prometheus::{CounterVec, IntCounter, Opts, Registry, TextEncoder};

use crate::{errors::WebhookError, models::MatchedSecret};

/// Verification metrics collector
#[derive(Clone)]
pub struct WebhookMetrics {
    pub registry: Registry,
    pub verifications_total: CounterVec,
    pub secondary_secret_matches_total: IntCounter,
}

impl WebhookMetrics {
    /// Create a collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // Verification attempts by outcome
        let verifications_total = CounterVec::new(
            Opts::new(
                "webhook_verifications_total",
                "Total number of webhook verification attempts",
            ),
            &["outcome"],
        )?;

        // Deliveries still signed with the rotation secret
        let secondary_secret_matches_total = IntCounter::new(
            "webhook_secondary_secret_matches_total",
            "Webhooks that only verified against the secondary secret",
        )?;

        registry.register(Box::new(verifications_total.clone()))?;
        registry.register(Box::new(secondary_secret_matches_total.clone()))?;

        Ok(Self {
            registry,
            verifications_total,
            secondary_secret_matches_total,
        })
    }

    /// Record the outcome of one verification attempt
    pub fn record(&self, outcome: &Result<MatchedSecret, WebhookError>) {
        let label = match outcome {
            Ok(_) => "accepted",
            Err(err) => err.kind(),
        };
        self.verifications_total.with_label_values(&[label]).inc();

        if let Ok(MatchedSecret::Secondary) = outcome {
            self.secondary_secret_matches_total.inc();
        }
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}

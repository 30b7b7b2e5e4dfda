//! License Webhooks - authenticity verification for inbound license webhooks
//!
//! A licensing backend signs each webhook delivery with HMAC-SHA256 over
//! `"{timestamp}.{raw body}"` and sends two headers:
//!
//! - `X-Webhook-Signature: sha256=<hex>`
//! - `X-Webhook-Timestamp: <ISO-8601 instant>`
//!
//! This crate checks those headers against the raw body, rejects stale
//! timestamps to stop replays, and supports a secondary secret while a
//! rotation is in progress.
//!
//! ## Architecture
//!
//! - `utils/hmac` - pure signature and timestamp checks (no I/O)
//! - `services/` - the request authenticator, outbound signer and metrics
//! - `middleware/` - actix-web middleware enforcing signatures on a scope
//! - `handlers/` - receiver endpoints and the app factory
//! - `config/` - configuration structures and environment loading
//! - `models/` - verification results, audit events and response bodies
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::{App, HttpResponse, web};
//! use license_webhooks::{EnsureWebhookSignature, WebhookConfig};
//!
//! let config = WebhookConfig::new("whsec_...");
//! let app = App::new().service(
//!     web::scope("/webhooks")
//!         .wrap(EnsureWebhookSignature::from_config(config))
//!         .route("/license", web::post().to(|| async { HttpResponse::Ok() })),
//! );
//! ```

pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

/// Header carrying the hex HMAC digest.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Header carrying the ISO-8601 signing timestamp.
pub const TIMESTAMP_HEADER: &str = "X-Webhook-Timestamp";

// Re-export commonly used types and functions for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ServerConfig, WebhookConfig};
pub use errors::{WebhookError, WebhookHeader};
pub use handlers::{
    create_app, create_app_from_config, get_metrics, health, receive_license_webhook,
};
pub use logging::{NoopLogger, TracingLogger, VerificationLogger, init_tracing};
pub use middleware::EnsureWebhookSignature;
pub use models::{
    ErrorResponse, HealthResponse, MatchedSecret, SecretSet, SignedMessage, VerificationResult,
    VerifiedWebhook, WebhookAck, WebhookAuditEvent, WebhookEventOutcome,
};
pub use services::{
    RequestAuthenticator, SignedHeaders, WebhookHeaders, WebhookMetrics, WebhookSigner,
    extract_webhook_headers,
};
pub use utils::hmac::{
    DEFAULT_TIMESTAMP_TOLERANCE, compute_signature, constant_time_eq, is_valid_webhook,
    validate_signature, validate_signature_at, validate_signature_with_fallback,
    validate_signature_with_fallback_at, validate_timestamp, validate_timestamp_at,
    verify_message,
};

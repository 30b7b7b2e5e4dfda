//! Request authentication for inbound webhooks.

use std::sync::Arc;

use actix_web::{HttpRequest, http::header::HeaderMap};

use crate::{
    SIGNATURE_HEADER, TIMESTAMP_HEADER,
    clock::{Clock, SystemClock},
    config::WebhookConfig,
    errors::{WebhookError, WebhookHeader},
    logging::{NoopLogger, VerificationLogger},
    models::{
        MatchedSecret, SignedMessage, VerificationResult, VerifiedWebhook, WebhookAuditEvent,
    },
    utils::{extract_client_ip, extract_user_agent, hmac::verify_message},
};

/// Signature and timestamp header values of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookHeaders {
    pub signature: String,
    pub timestamp: String,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Read the signature and timestamp headers.
///
/// Absent, empty and non-visible-ASCII values all count as missing.
pub fn extract_webhook_headers(headers: &HeaderMap) -> Result<WebhookHeaders, WebhookError> {
    let signature = header_value(headers, SIGNATURE_HEADER)
        .ok_or(WebhookError::MissingHeader(WebhookHeader::Signature))?;

    let timestamp = header_value(headers, TIMESTAMP_HEADER)
        .ok_or(WebhookError::MissingHeader(WebhookHeader::Timestamp))?;

    Ok(WebhookHeaders {
        signature,
        timestamp,
    })
}

fn classify(result: VerificationResult) -> Result<MatchedSecret, WebhookError> {
    match result {
        VerificationResult::Valid(secret) => Ok(secret),
        VerificationResult::InvalidSignature => Err(WebhookError::SignatureMismatch),
        VerificationResult::StaleTimestamp => Err(WebhookError::StaleTimestamp),
        VerificationResult::MalformedInput => Err(WebhookError::MalformedTimestamp),
    }
}

/// Decides whether an inbound request is a genuine webhook delivery.
///
/// Cheap to clone; configuration, clock and logger are shared.
#[derive(Clone)]
pub struct RequestAuthenticator {
    config: Arc<WebhookConfig>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn VerificationLogger>,
}

impl RequestAuthenticator {
    /// Authenticator using wall-clock time and no logging.
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            logger: Arc::new(NoopLogger),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_logger(mut self, logger: impl VerificationLogger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Check extracted headers and the buffered body against the
    /// configured secrets.
    pub fn verify(
        &self,
        headers: &WebhookHeaders,
        body: &[u8],
    ) -> Result<MatchedSecret, WebhookError> {
        if !self.config.has_secret() {
            return Err(WebhookError::Configuration(
                "no webhook secret configured".to_string(),
            ));
        }

        let message = SignedMessage::new(body, &headers.timestamp, &headers.signature);
        classify(verify_message(
            &message,
            &self.config.secrets(),
            self.config.tolerance(),
            self.clock.as_ref(),
        ))
    }

    /// Read the webhook headers of `req`, logging the rejection if either
    /// is missing.
    pub fn check_headers(&self, req: &HttpRequest) -> Result<WebhookHeaders, WebhookError> {
        extract_webhook_headers(req.headers()).inspect_err(|err| {
            self.audit(req, &Err(err.clone()));
        })
    }

    /// Verify a request whose headers were already checked and whose body
    /// has been read, then log the outcome.
    pub fn authenticate(
        &self,
        req: &HttpRequest,
        headers: WebhookHeaders,
        body: &[u8],
    ) -> Result<VerifiedWebhook, WebhookError> {
        let outcome = self.verify(&headers, body);
        self.audit(req, &outcome);

        outcome.map(|matched_secret| VerifiedWebhook {
            matched_secret,
            timestamp: headers.timestamp,
        })
    }

    /// Report an outcome to the configured logger.
    pub fn audit(&self, req: &HttpRequest, outcome: &Result<MatchedSecret, WebhookError>) {
        let event = match outcome {
            Ok(secret) => WebhookAuditEvent::accepted(*secret),
            Err(err) => WebhookAuditEvent::rejected(err),
        }
        .with_request(req.method().as_str(), req.path())
        .with_ip_address(extract_client_ip(req))
        .with_user_agent(extract_user_agent(req));

        match outcome {
            Ok(_) => self.logger.debug(&event),
            Err(err) if err.is_server_fault() => self.logger.error(&event),
            Err(_) => self.logger.warn(&event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::FixedClock, models::WebhookEventOutcome, services::WebhookSigner};
    use actix_web::test::TestRequest;
    use std::sync::Mutex;

    const NOW: &str = "2024-01-01T00:00:00Z";
    const BODY: &[u8] = br#"{"event":"ping"}"#;

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, WebhookAuditEvent)>>,
    }

    impl VerificationLogger for Arc<RecordingLogger> {
        fn debug(&self, event: &WebhookAuditEvent) {
            self.events.lock().unwrap().push(("debug", event.clone()));
        }
        fn warn(&self, event: &WebhookAuditEvent) {
            self.events.lock().unwrap().push(("warn", event.clone()));
        }
        fn error(&self, event: &WebhookAuditEvent) {
            self.events.lock().unwrap().push(("error", event.clone()));
        }
    }

    fn authenticator(config: WebhookConfig) -> RequestAuthenticator {
        RequestAuthenticator::new(config).with_clock(FixedClock::from_rfc3339(NOW).unwrap())
    }

    fn signed(secret: &str) -> WebhookHeaders {
        let headers = WebhookSigner::new(secret)
            .sign_with_timestamp(BODY, NOW)
            .unwrap();
        WebhookHeaders {
            signature: headers.signature,
            timestamp: headers.timestamp,
        }
    }

    #[test]
    fn extracts_both_headers() {
        let req = TestRequest::post()
            .insert_header(("X-Webhook-Signature", "sha256=abc"))
            .insert_header(("x-webhook-timestamp", NOW))
            .to_http_request();

        let headers = extract_webhook_headers(req.headers()).unwrap();
        assert_eq!(headers.signature, "sha256=abc");
        assert_eq!(headers.timestamp, NOW);
    }

    #[test]
    fn missing_or_empty_headers_are_reported_in_order() {
        let req = TestRequest::post().to_http_request();
        assert_eq!(
            extract_webhook_headers(req.headers()),
            Err(WebhookError::MissingHeader(WebhookHeader::Signature))
        );

        let req = TestRequest::post()
            .insert_header(("X-Webhook-Signature", "sha256=abc"))
            .insert_header(("X-Webhook-Timestamp", ""))
            .to_http_request();
        assert_eq!(
            extract_webhook_headers(req.headers()),
            Err(WebhookError::MissingHeader(WebhookHeader::Timestamp))
        );
    }

    #[test]
    fn accepts_primary_and_secondary() {
        let auth = authenticator(WebhookConfig::new("new").with_secondary_secret("old"));

        assert_eq!(auth.verify(&signed("new"), BODY), Ok(MatchedSecret::Primary));
        assert_eq!(auth.verify(&signed("old"), BODY), Ok(MatchedSecret::Secondary));
        assert_eq!(
            auth.verify(&signed("other"), BODY),
            Err(WebhookError::SignatureMismatch)
        );
    }

    #[test]
    fn empty_primary_secret_is_configuration_error() {
        let auth = authenticator(WebhookConfig::new("").with_secondary_secret("old"));
        let result = auth.verify(&signed("old"), BODY);
        assert!(matches!(result, Err(WebhookError::Configuration(_))));
    }

    #[test]
    fn stale_and_malformed_timestamps_are_classified() {
        let auth = authenticator(WebhookConfig::new("k"));

        let mut headers = signed("k");
        headers.timestamp = "2023-12-31T23:00:00Z".to_string();
        assert_eq!(auth.verify(&headers, BODY), Err(WebhookError::StaleTimestamp));

        headers.timestamp = "last tuesday".to_string();
        assert_eq!(auth.verify(&headers, BODY), Err(WebhookError::MalformedTimestamp));
    }

    #[test]
    fn authenticate_logs_without_leaking_secrets() {
        let logger = Arc::new(RecordingLogger::default());
        let auth = authenticator(WebhookConfig::new("whsec_live")).with_logger(logger.clone());
        let good = signed("whsec_live");

        let req = TestRequest::post()
            .uri("/webhooks/license")
            .insert_header(("X-Webhook-Signature", good.signature.clone()))
            .insert_header(("X-Webhook-Timestamp", good.timestamp.clone()))
            .to_http_request();
        let headers = auth.check_headers(&req).unwrap();
        let verified = auth.authenticate(&req, headers, BODY).unwrap();
        assert_eq!(verified.matched_secret, MatchedSecret::Primary);
        assert_eq!(verified.timestamp, NOW);

        let req = TestRequest::post()
            .uri("/webhooks/license")
            .insert_header(("X-Webhook-Signature", "sha256=00"))
            .insert_header(("X-Webhook-Timestamp", NOW))
            .to_http_request();
        let headers = auth.check_headers(&req).unwrap();
        assert_eq!(
            auth.authenticate(&req, headers, BODY),
            Err(WebhookError::SignatureMismatch)
        );

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "debug");
        assert_eq!(events[0].1.outcome, WebhookEventOutcome::Accepted);
        assert_eq!(events[1].0, "warn");
        assert_eq!(events[1].1.reason.as_deref(), Some("signature_mismatch"));
        assert_eq!(events[1].1.endpoint, "/webhooks/license");

        for (_, event) in events.iter() {
            let rendered = serde_json::to_string(event).unwrap();
            assert!(!rendered.contains("whsec_live"));
            assert!(!rendered.contains(&good.signature[7..]));
        }
    }

    #[test]
    fn missing_headers_are_logged_once() {
        let logger = Arc::new(RecordingLogger::default());
        let auth = authenticator(WebhookConfig::new("k")).with_logger(logger.clone());

        let req = TestRequest::post()
            .insert_header(("X-Webhook-Timestamp", NOW))
            .to_http_request();
        assert_eq!(
            auth.check_headers(&req),
            Err(WebhookError::MissingHeader(WebhookHeader::Signature))
        );

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "warn");
        assert_eq!(events[0].1.reason.as_deref(), Some("missing_header"));
    }

    #[test]
    fn configuration_errors_log_at_error_level() {
        let logger = Arc::new(RecordingLogger::default());
        let auth = authenticator(WebhookConfig::default()).with_logger(logger.clone());

        let req = TestRequest::post()
            .insert_header(("X-Webhook-Signature", "sha256=00"))
            .insert_header(("X-Webhook-Timestamp", NOW))
            .to_http_request();
        let headers = auth.check_headers(&req).unwrap();
        let result = auth.authenticate(&req, headers, BODY);

        assert!(matches!(result, Err(WebhookError::Configuration(_))));
        assert_eq!(logger.events.lock().unwrap()[0].0, "error");
    }
}

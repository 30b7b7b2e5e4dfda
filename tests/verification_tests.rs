//! Signature verification properties exercised through the public API.

use std::{sync::Arc, time::Duration};

use license_webhooks::{
    FixedClock, MatchedSecret, RequestAuthenticator, SecretSet, SignedMessage,
    VerificationResult, WebhookConfig, WebhookHeaders, WebhookSigner, compute_signature,
    validate_signature_at, validate_signature_with_fallback_at, verify_message,
};

const SECRET: &[u8] = b"whsec_test";
const TIMESTAMP: &str = "2024-01-01T00:00:00Z";
const PAYLOAD: &[u8] = br#"{"event":"ping"}"#;

fn at(instant: &str) -> FixedClock {
    FixedClock::from_rfc3339(instant).unwrap()
}

#[test]
fn test_ping_scenario() {
    let digest = compute_signature(PAYLOAD, SECRET, TIMESTAMP).unwrap();
    let header = format!("sha256={digest}");

    assert!(validate_signature_at(
        PAYLOAD,
        &header,
        TIMESTAMP,
        SECRET,
        None,
        &at("2024-01-01T00:02:00Z")
    ));
    assert!(!validate_signature_at(
        PAYLOAD,
        &header,
        TIMESTAMP,
        SECRET,
        None,
        &at("2024-01-01T00:06:00Z")
    ));
}

#[test]
fn test_boundary_with_custom_tolerance() {
    let tolerance = Some(Duration::from_secs(60));
    let digest = compute_signature(PAYLOAD, SECRET, TIMESTAMP).unwrap();
    let check = |now: &str| {
        validate_signature_at(PAYLOAD, &digest, TIMESTAMP, SECRET, tolerance, &at(now))
    };

    assert!(check("2024-01-01T00:01:00Z"));
    assert!(check("2023-12-31T23:59:00Z"));
    assert!(!check("2024-01-01T00:01:01Z"));
    assert!(!check("2023-12-31T23:58:59Z"));
}

#[test]
fn test_fallback_requires_configured_secondary() {
    let now = at(TIMESTAMP);
    let old = compute_signature(PAYLOAD, b"old", TIMESTAMP).unwrap();

    assert!(validate_signature_with_fallback_at(
        PAYLOAD,
        &old,
        TIMESTAMP,
        b"new",
        Some(&b"old"[..]),
        None,
        &now
    ));
    assert!(!validate_signature_with_fallback_at(
        PAYLOAD, &old, TIMESTAMP, b"new", None, None, &now
    ));
}

#[test]
fn test_fallback_reports_stale_for_both_secrets() {
    let old = compute_signature(PAYLOAD, b"old", TIMESTAMP).unwrap();
    let secrets = SecretSet::new(b"new").with_secondary(Some(&b"old"[..]));

    let result = verify_message(
        &SignedMessage::new(PAYLOAD, TIMESTAMP, &old),
        &secrets,
        Duration::from_secs(300),
        &at("2024-01-01T01:00:00Z"),
    );
    assert_eq!(result, VerificationResult::StaleTimestamp);
}

#[test]
fn test_signer_output_is_accepted_by_authenticator() {
    let clock = at("2024-03-15T08:30:00Z");
    let body = br#"{"event":"license.renewed","data":{"licenseId":"lic_42"}}"#;
    let signed = WebhookSigner::new("whsec_test").sign_at(body, &clock).unwrap();

    let authenticator =
        RequestAuthenticator::new(WebhookConfig::new("whsec_test")).with_clock(clock);
    let headers = WebhookHeaders {
        signature: signed.signature,
        timestamp: signed.timestamp,
    };

    assert_eq!(authenticator.verify(&headers, body), Ok(MatchedSecret::Primary));
}

/// Verification shares nothing mutable, so any number of tasks can use one
/// authenticator at once and each gets an independent verdict
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_verification_is_independent() {
    let clock = at(TIMESTAMP);
    let authenticator = Arc::new(
        RequestAuthenticator::new(WebhookConfig::new("new").with_secondary_secret("old"))
            .with_clock(clock),
    );

    let mut handles = Vec::new();
    for i in 0..64 {
        let authenticator = Arc::clone(&authenticator);
        handles.push(tokio::spawn(async move {
            let body = format!(r#"{{"event":"ping","seq":{i}}}"#);
            let secret = match i % 3 {
                0 => "new",
                1 => "old",
                _ => "forged",
            };
            let signed = WebhookSigner::new(secret)
                .sign_with_timestamp(body.as_bytes(), TIMESTAMP)
                .unwrap();
            let headers = WebhookHeaders {
                signature: signed.signature,
                timestamp: signed.timestamp,
            };
            (i, authenticator.verify(&headers, body.as_bytes()))
        }));
    }

    for handle in handles {
        let (i, outcome) = handle.await.unwrap();
        match i % 3 {
            0 => assert_eq!(outcome, Ok(MatchedSecret::Primary)),
            1 => assert_eq!(outcome, Ok(MatchedSecret::Secondary)),
            _ => assert!(outcome.is_err(), "forged delivery {i} was accepted"),
        }
    }
}

//! HMAC-SHA256 webhook signature computation and validation.
//!
//! Signed material is `"{timestamp}.{payload}"`: the timestamp header value,
//! an ASCII dot, then the raw body bytes. The digest is sent as lowercase hex,
//! optionally prefixed with `sha256=`.
//!
//! Every function here is pure apart from reading the supplied [`Clock`], and
//! never panics on malformed input; failures fold into `false` or a
//! non-valid [`VerificationResult`].

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    clock::{Clock, SystemClock},
    errors::WebhookError,
    models::{MatchedSecret, SecretSet, SignedMessage, VerificationResult},
};

type HmacSha256 = Hmac<Sha256>;

/// Default allowed skew between the sender's timestamp and local time.
pub const DEFAULT_TIMESTAMP_TOLERANCE: Duration = Duration::from_secs(5 * 60);

/// Algorithm tag that may precede the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the lowercase hex HMAC-SHA256 of `"{timestamp}.{payload}"`.
pub fn compute_signature(
    payload: &[u8],
    secret: &[u8],
    timestamp: &str,
) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| WebhookError::Configuration(format!("Invalid secret key: {e}")))?;

    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Parse a round-trip ISO-8601 instant.
///
/// Offsets are honoured; a value without an offset is read as UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn within_tolerance(timestamp: DateTime<Utc>, now: DateTime<Utc>, tolerance: Duration) -> bool {
    let tolerance = TimeDelta::from_std(tolerance).unwrap_or(TimeDelta::MAX);
    (now - timestamp).abs() <= tolerance
}

/// Check that `timestamp` parses and lies within `tolerance` of now, in
/// either direction.
pub fn validate_timestamp(timestamp: &str, tolerance: Duration) -> bool {
    validate_timestamp_at(timestamp, tolerance, &SystemClock)
}

/// [`validate_timestamp`] against an explicit clock.
pub fn validate_timestamp_at<C: Clock + ?Sized>(
    timestamp: &str,
    tolerance: Duration,
    clock: &C,
) -> bool {
    parse_timestamp(timestamp)
        .is_some_and(|ts| within_tolerance(ts, clock.now_utc(), tolerance))
}

/// Remove a case-insensitive `sha256=` prefix, if present.
pub fn strip_signature_prefix(signature: &str) -> &str {
    match signature.get(..SIGNATURE_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(SIGNATURE_PREFIX) => {
            &signature[SIGNATURE_PREFIX.len()..]
        }
        _ => signature,
    }
}

fn diff_accumulator(a: &[u8], b: &[u8]) -> u8 {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y))
}

/// Compare two byte strings without exiting at the first mismatch.
///
/// Lengths are compared up front; a hex SHA-256 digest always has the same
/// public length, so that early return reveals nothing about the secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    diff_accumulator(a, b) == 0
}

fn check_with_secret<C: Clock + ?Sized>(
    message: &SignedMessage<'_>,
    secret: &[u8],
    which: MatchedSecret,
    tolerance: Duration,
    clock: &C,
) -> VerificationResult {
    if message.payload.is_empty()
        || message.signature.is_empty()
        || message.timestamp.is_empty()
        || secret.is_empty()
    {
        return VerificationResult::MalformedInput;
    }

    let Some(timestamp) = parse_timestamp(message.timestamp) else {
        return VerificationResult::MalformedInput;
    };

    if !within_tolerance(timestamp, clock.now_utc(), tolerance) {
        return VerificationResult::StaleTimestamp;
    }

    let presented = strip_signature_prefix(message.signature);

    let Ok(expected) = compute_signature(message.payload, secret, message.timestamp) else {
        return VerificationResult::InvalidSignature;
    };

    if constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        VerificationResult::Valid(which)
    } else {
        VerificationResult::InvalidSignature
    }
}

/// Verify a message against a secret set, primary first.
///
/// The secondary secret is only tried when the primary fails and a
/// non-empty secondary is configured. When both fail, the secondary's
/// classification is reported.
pub fn verify_message<C: Clock + ?Sized>(
    message: &SignedMessage<'_>,
    secrets: &SecretSet<'_>,
    tolerance: Duration,
    clock: &C,
) -> VerificationResult {
    let primary = check_with_secret(
        message,
        secrets.primary,
        MatchedSecret::Primary,
        tolerance,
        clock,
    );
    if primary.is_valid() {
        return primary;
    }

    match secrets.rotation_secret() {
        Some(secondary) => check_with_secret(
            message,
            secondary,
            MatchedSecret::Secondary,
            tolerance,
            clock,
        ),
        None => primary,
    }
}

/// Validate a webhook signature against a single secret.
pub fn validate_signature(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &[u8],
    tolerance: Option<Duration>,
) -> bool {
    validate_signature_at(payload, signature, timestamp, secret, tolerance, &SystemClock)
}

/// [`validate_signature`] against an explicit clock.
pub fn validate_signature_at<C: Clock + ?Sized>(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &[u8],
    tolerance: Option<Duration>,
    clock: &C,
) -> bool {
    let message = SignedMessage::new(payload, timestamp, signature);
    check_with_secret(
        &message,
        secret,
        MatchedSecret::Primary,
        tolerance.unwrap_or(DEFAULT_TIMESTAMP_TOLERANCE),
        clock,
    )
    .is_valid()
}

/// Validate with the primary secret, falling back to the secondary during
/// a rotation.
pub fn validate_signature_with_fallback(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    primary_secret: &[u8],
    secondary_secret: Option<&[u8]>,
    tolerance: Option<Duration>,
) -> bool {
    validate_signature_with_fallback_at(
        payload,
        signature,
        timestamp,
        primary_secret,
        secondary_secret,
        tolerance,
        &SystemClock,
    )
}

/// [`validate_signature_with_fallback`] against an explicit clock.
pub fn validate_signature_with_fallback_at<C: Clock + ?Sized>(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    primary_secret: &[u8],
    secondary_secret: Option<&[u8]>,
    tolerance: Option<Duration>,
    clock: &C,
) -> bool {
    let message = SignedMessage::new(payload, timestamp, signature);
    let secrets = SecretSet::new(primary_secret).with_secondary(secondary_secret);
    verify_message(
        &message,
        &secrets,
        tolerance.unwrap_or(DEFAULT_TIMESTAMP_TOLERANCE),
        clock,
    )
    .is_valid()
}

/// Check raw header values and body with the default tolerance.
pub fn is_valid_webhook(
    body: &[u8],
    signature_header: &str,
    timestamp_header: &str,
    secret: &[u8],
) -> bool {
    validate_signature(body, signature_header, timestamp_header, secret, None)
}

//! Verification inputs and outcomes.

use serde::{Deserialize, Serialize};

/// Which configured secret produced a matching signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedSecret {
    Primary,
    Secondary,
}

/// Outcome of verifying one message against one secret set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    Valid(MatchedSecret),
    InvalidSignature,
    StaleTimestamp,
    /// An empty field, or a timestamp that does not parse.
    MalformedInput,
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Valid(_))
    }

    pub fn matched_secret(&self) -> Option<MatchedSecret> {
        match self {
            VerificationResult::Valid(secret) => Some(*secret),
            _ => None,
        }
    }
}

/// The three externally supplied parts of a signed delivery.
#[derive(Debug, Clone, Copy)]
pub struct SignedMessage<'a> {
    /// Raw body bytes exactly as received.
    pub payload: &'a [u8],
    /// ISO-8601 instant from `X-Webhook-Timestamp`.
    pub timestamp: &'a str,
    /// Hex digest, optionally prefixed with `sha256=`.
    pub signature: &'a str,
}

impl<'a> SignedMessage<'a> {
    pub fn new(payload: &'a [u8], timestamp: &'a str, signature: &'a str) -> Self {
        Self {
            payload,
            timestamp,
            signature,
        }
    }
}

/// Primary secret plus the optional secondary accepted during rotation.
#[derive(Debug, Clone, Copy)]
pub struct SecretSet<'a> {
    pub primary: &'a [u8],
    pub secondary: Option<&'a [u8]>,
}

impl<'a> SecretSet<'a> {
    pub fn new(primary: &'a [u8]) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: Option<&'a [u8]>) -> Self {
        self.secondary = secondary;
        self
    }

    /// The secondary secret, if one is configured and non-empty.
    pub fn rotation_secret(&self) -> Option<&'a [u8]> {
        self.secondary.filter(|s| !s.is_empty())
    }
}

/// Stored in request extensions once a delivery has been authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedWebhook {
    pub matched_secret: MatchedSecret,
    pub timestamp: String,
}

/// JSON body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

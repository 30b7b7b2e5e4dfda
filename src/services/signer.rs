//! Sender side of the signing contract.
//!
//! Produces the header values a delivery must carry for
//! [`crate::RequestAuthenticator`] to accept it.

use chrono::SecondsFormat;

use crate::{
    SIGNATURE_HEADER, TIMESTAMP_HEADER,
    clock::{Clock, SystemClock},
    errors::WebhookError,
    utils::hmac::{SIGNATURE_PREFIX, compute_signature},
};

/// Header values for one signed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `sha256=<hex>`
    pub signature: String,
    pub timestamp: String,
}

impl SignedHeaders {
    /// `(name, value)` pairs ready to attach to a request.
    pub fn to_pairs(&self) -> [(&'static str, String); 2] {
        [
            (SIGNATURE_HEADER, self.signature.clone()),
            (TIMESTAMP_HEADER, self.timestamp.clone()),
        ]
    }
}

/// Signs webhook bodies with a shared secret.
#[derive(Clone)]
pub struct WebhookSigner {
    secret: Vec<u8>,
}

impl WebhookSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign `body` stamped with the current time.
    pub fn sign(&self, body: &[u8]) -> Result<SignedHeaders, WebhookError> {
        self.sign_at(body, &SystemClock)
    }

    /// Sign `body` stamped with `clock`'s time, formatted as RFC 3339 UTC.
    pub fn sign_at<C: Clock + ?Sized>(
        &self,
        body: &[u8],
        clock: &C,
    ) -> Result<SignedHeaders, WebhookError> {
        let timestamp = clock.now_utc().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.sign_with_timestamp(body, &timestamp)
    }

    /// Sign `body` with a caller-supplied timestamp string, used verbatim.
    pub fn sign_with_timestamp(
        &self,
        body: &[u8],
        timestamp: &str,
    ) -> Result<SignedHeaders, WebhookError> {
        if self.secret.is_empty() {
            return Err(WebhookError::Configuration(
                "webhook signing secret is empty".to_string(),
            ));
        }

        let digest = compute_signature(body, &self.secret, timestamp)?;

        Ok(SignedHeaders {
            signature: format!("{SIGNATURE_PREFIX}{digest}"),
            timestamp: timestamp.to_string(),
        })
    }
}

//! API response models for the receiver endpoints.

use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Acknowledgement returned once a verified webhook has been accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
    /// Value of the payload's `event` field, when present.
    pub event: Option<String>,
}

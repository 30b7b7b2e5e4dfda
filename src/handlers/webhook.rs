//! License webhook receiver.

use crate::models::{ErrorResponse, VerifiedWebhook, WebhookAck};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use tracing::info;

/// Receive a license webhook.
///
/// Must be mounted behind [`crate::EnsureWebhookSignature`]; by the time this
/// runs the body has been authenticated and is re-read here as JSON.
pub async fn receive_license_webhook(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: format!("Invalid JSON payload: {e}"),
            });
        }
    };

    let event = payload
        .get("event")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let matched_secret = req
        .extensions()
        .get::<VerifiedWebhook>()
        .map(|v| v.matched_secret);

    info!(
        target: "webhook",
        event = ?event,
        matched_secret = ?matched_secret,
        body_bytes = body.len(),
        "License webhook received"
    );

    HttpResponse::Ok().json(WebhookAck {
        received: true,
        event,
    })
}

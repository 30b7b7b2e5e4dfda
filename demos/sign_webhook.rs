//! Webhook Signing Demo
//!
//! Signs a sample license webhook the way the licensing backend does and
//! prints the headers plus a curl command for a locally running receiver.
//! Run with:
//!
//! ```
//! cargo run --example sign_webhook
//! ```

use license_webhooks::{WebhookSigner, is_valid_webhook};

fn main() {
    println!("🔐 License Webhook Signing Demo");
    println!("===============================\n");

    let secret = std::env::var("WEBHOOK_SECRET").unwrap_or_else(|_| "whsec_demo".to_string());
    let payload = r#"{"event":"license.created","data":{"licenseId":"lic_123"}}"#;

    println!("Configuration:");
    println!("  Payload: {payload}");

    let headers = match WebhookSigner::new(secret.as_str()).sign(payload.as_bytes()) {
        Ok(headers) => headers,
        Err(e) => {
            println!("❌ Error signing webhook: {e}");
            return;
        }
    };

    println!("\n✅ Generated Headers:");
    println!("  X-Webhook-Signature: {}", headers.signature);
    println!("  X-Webhook-Timestamp: {}", headers.timestamp);

    println!("\n🔍 Signed material (format: timestamp.payload):");
    println!("  '{}.{payload}'", headers.timestamp);

    let verified = is_valid_webhook(
        payload.as_bytes(),
        &headers.signature,
        &headers.timestamp,
        secret.as_bytes(),
    );
    println!("\n🧪 Local verification: {}", if verified { "valid" } else { "INVALID" });

    println!("\n📋 Example curl command:");
    println!("curl -X POST \\");
    println!("     -H 'Content-Type: application/json' \\");
    println!("     -H 'X-Webhook-Signature: {}' \\", headers.signature);
    println!("     -H 'X-Webhook-Timestamp: {}' \\", headers.timestamp);
    println!("     -d '{payload}' \\");
    println!("     http://localhost:8080/webhooks/license");

    println!("\n⚙️  Receiver configuration:");
    println!("  export WEBHOOK_SECRET=<same secret>");
    println!("  export WEBHOOK_SECONDARY_SECRET=<previous secret, during rotation>");
    println!("  export WEBHOOK_TIMESTAMP_TOLERANCE=300  # seconds");
}

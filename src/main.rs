use actix_web::HttpServer;
use license_webhooks::{
    ServerConfig, WebhookConfig, WebhookMetrics, create_app_from_config, init_tracing,
};
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // JSON logs, filtered by RUST_LOG (default info)
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let webhook_config = WebhookConfig::from_env();
    let server_config = ServerConfig::from_env();
    let metrics = WebhookMetrics::new().map_err(std::io::Error::other)?;

    if !webhook_config.has_secret() {
        // Requests will be answered with 500 until a secret is provided
        warn!("WEBHOOK_SECRET is not set; webhook requests will be rejected");
    }

    info!(
        bind_address = %server_config.bind_address,
        tolerance_seconds = webhook_config.tolerance().as_secs(),
        rotation_active = webhook_config.secondary_secret.is_some(),
        "Starting license webhook receiver"
    );

    let bind_address = server_config.bind_address.clone();

    HttpServer::new(move || {
        create_app_from_config(webhook_config.clone(), &server_config, metrics.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}

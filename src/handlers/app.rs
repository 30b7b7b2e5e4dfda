//! Application factory.

use crate::{
    config::{ServerConfig, WebhookConfig},
    handlers::{get_metrics, health, receive_license_webhook},
    logging::TracingLogger,
    middleware::EnsureWebhookSignature,
    services::{RequestAuthenticator, WebhookMetrics},
};
use actix_web::{App, web};

/// Creates the receiver application
///
/// - `GET /api/health` and `GET /api/metrics`, unauthenticated
/// - everything under `/webhooks` behind [`EnsureWebhookSignature`]
///
/// Used both by the binary and by integration tests, which pass an
/// authenticator with a fixed clock.
pub fn create_app(
    authenticator: RequestAuthenticator,
    server_config: &ServerConfig,
    metrics: WebhookMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(metrics))
        .app_data(web::PayloadConfig::new(server_config.max_body_bytes))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .service(
            web::scope("/webhooks")
                .wrap(EnsureWebhookSignature::new(authenticator))
                .service(
                    web::resource("/license").route(web::post().to(receive_license_webhook)),
                ),
        )
}

/// [`create_app`] with a wall-clock authenticator logging through `tracing`.
pub fn create_app_from_config(
    config: WebhookConfig,
    server_config: &ServerConfig,
    metrics: WebhookMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let authenticator = RequestAuthenticator::new(config).with_logger(TracingLogger);
    create_app(authenticator, server_config, metrics)
}

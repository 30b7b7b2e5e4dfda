//! Webhook signature enforcement middleware.

use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web::{self, Bytes},
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};

use crate::{
    config::WebhookConfig,
    errors::WebhookError,
    logging::TracingLogger,
    models::MatchedSecret,
    services::{RequestAuthenticator, WebhookMetrics},
};

/// Middleware factory that only lets authentic webhook deliveries through.
///
/// Wrap it around a `web::scope` or a single resource; every route below
/// that point requires a valid `X-Webhook-Signature`. The raw body is
/// buffered for verification and handed back to the request unchanged, so
/// downstream extractors still see the full payload. On success a
/// [`VerifiedWebhook`](crate::models::VerifiedWebhook) is placed in the request extensions.
#[derive(Clone)]
pub struct EnsureWebhookSignature {
    authenticator: RequestAuthenticator,
}

impl EnsureWebhookSignature {
    pub fn new(authenticator: RequestAuthenticator) -> Self {
        Self { authenticator }
    }

    /// Wall-clock authenticator that logs through `tracing`.
    pub fn from_config(config: WebhookConfig) -> Self {
        Self::new(RequestAuthenticator::new(config).with_logger(TracingLogger))
    }
}

impl<S, B> Transform<S, ServiceRequest> for EnsureWebhookSignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = EnsureWebhookSignatureService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(EnsureWebhookSignatureService {
            service: Rc::new(service),
            authenticator: self.authenticator.clone(),
        }))
    }
}

/// The actual webhook signature middleware service
pub struct EnsureWebhookSignatureService<S> {
    service: Rc<S>,
    authenticator: RequestAuthenticator,
}

fn record_metrics(req: &ServiceRequest, outcome: &Result<MatchedSecret, WebhookError>) {
    if let Some(metrics) = req.app_data::<web::Data<WebhookMetrics>>() {
        metrics.record(outcome);
    }
}

impl<S, B> Service<ServiceRequest> for EnsureWebhookSignatureService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            // Header checks come first so unsigned traffic never costs a body read
            let headers = match authenticator.check_headers(req.request()) {
                Ok(headers) => headers,
                Err(err) => {
                    record_metrics(&req, &Err(err.clone()));
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };

            // Byte-exact body; honours any web::PayloadConfig limit on the route
            let body = match req.extract::<Bytes>().await {
                Ok(body) => body,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };

            match authenticator.authenticate(req.request(), headers, &body) {
                Ok(verified) => {
                    record_metrics(&req, &Ok(verified.matched_secret));
                    req.extensions_mut().insert(verified);
                    req.set_payload(Payload::from(body));

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    record_metrics(&req, &Err(err.clone()));
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

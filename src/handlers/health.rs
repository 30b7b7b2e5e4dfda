//! Health check endpoint handler.

use crate::models::HealthResponse;
use actix_web::web;

/// Health check endpoint
///
/// Unauthenticated liveness probe for load balancers and orchestrators.
pub async fn health() -> web::Json<HealthResponse> {
    web::Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

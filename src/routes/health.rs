use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::db::TableStore;
use crate::services::location_service::LocationService;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Always answers 200; store trouble is reported in the body.
pub async fn health_check<S: TableStore>(
    service: web::Data<LocationService<S>>,
) -> impl Responder {
    match service.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthStatus {
            status: "healthy",
            error: None,
        }),
        Err(err) => {
            log::warn!("Health check against '{}' failed: {}", service.table(), err);
            HttpResponse::Ok().json(HealthStatus {
                status: "unhealthy",
                error: Some(err.to_string()),
            })
        }
    }
}

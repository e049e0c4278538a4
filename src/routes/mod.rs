pub mod health;
pub mod location;

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::db::TableStore;
use crate::error::ApiError;
use crate::models::location::FieldError;

/// Registers the health probe and the location routes for a store type.
///
/// The caller provides `web::Data<LocationService<S>>` as app data.
pub fn configure<S: TableStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(vec![FieldError::new("body", err.to_string())]).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Validation(vec![FieldError::new("location_id", err.to_string())]).into()
    }))
    .route("/health", web::get().to(health::health_check::<S>))
    .default_service(web::to(route_not_found));

    // collection routes answer with and without the trailing slash
    for path in ["/locations", "/locations/"] {
        cfg.service(
            web::resource(path)
                .route(web::get().to(location::list_locations::<S>))
                .route(web::post().to(location::create_location::<S>))
                .default_service(web::to(method_not_allowed)),
        );
    }

    cfg.service(
        web::resource("/locations/{location_id}")
            .route(web::get().to(location::get_location::<S>))
            .route(web::put().to(location::update_location::<S>))
            .route(web::delete().to(location::delete_location::<S>))
            .default_service(web::to(method_not_allowed)),
    );
}

async fn route_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "error": format!("No route for {} {}", req.method(), req.path())
    }))
}

async fn method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({
        "error": format!("Method {} not allowed on {}", req.method(), req.path())
    }))
}

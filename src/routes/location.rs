use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::db::TableStore;
use crate::error::ApiError;
use crate::models::location::Location;
use crate::services::location_service::LocationService;

pub async fn create_location<S: TableStore>(
    service: web::Data<LocationService<S>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let location = Location::validate(&body.into_inner())?;
    let created = service.create(&location).await?;
    log::info!("Created location {}", created.id);
    Ok(HttpResponse::Ok().json(created))
}

pub async fn list_locations<S: TableStore>(
    service: web::Data<LocationService<S>>,
) -> Result<HttpResponse, ApiError> {
    let locations = service.list().await?;
    Ok(HttpResponse::Ok().json(locations))
}

pub async fn get_location<S: TableStore>(
    service: web::Data<LocationService<S>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let location = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(location))
}

pub async fn update_location<S: TableStore>(
    service: web::Data<LocationService<S>>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let location = Location::validate(&body.into_inner())?;
    let updated = service.update(path.into_inner(), &location).await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_location<S: TableStore>(
    service: web::Data<LocationService<S>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = service.delete(id).await?;
    log::info!("Deleted location {}", id);
    Ok(HttpResponse::Ok().json(deleted))
}

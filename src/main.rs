use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use locations_api::config::{Config, StoreBackend};
use locations_api::db::{memory::MemoryStore, supabase::create_supabase_store, TableStore};
use locations_api::routes;
use locations_api::services::location_service::LocationService;

async fn serve<S>(config: Config, store: S) -> io::Result<()>
where
    S: TableStore + Send + Sync + 'static,
{
    let service = web::Data::new(LocationService::new(store, config.table.clone()));

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(routes::configure::<S>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    match config.backend.clone() {
        StoreBackend::Supabase { url, key } => {
            let store = create_supabase_store(&url, &key, config.store_timeout).map_err(|e| {
                log::error!("Failed to create Supabase client: {}", e);
                io::Error::new(io::ErrorKind::InvalidInput, e)
            })?;
            serve(config, store).await
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on exit");
            serve(config, MemoryStore::new()).await
        }
    }
}

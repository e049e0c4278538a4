#![allow(dead_code)]

use actix_web::{web, App};
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

use locations_api::db::{memory::MemoryStore, Query, StoreError, TableStore};
use locations_api::routes;
use locations_api::services::location_service::LocationService;

pub const TABLE: &str = "company_tickets";

pub struct TestApp<S> {
    pub service: web::Data<LocationService<S>>,
}

impl TestApp<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: TableStore + 'static> TestApp<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            service: web::Data::new(LocationService::new(store, TABLE)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.service.clone())
            .configure(routes::configure::<S>)
    }
}

/// Store whose every call fails, standing in for an unreachable database.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::StatusError {
        status: 503,
        body: "database unavailable".to_string(),
    }
}

impl TableStore for FailingStore {
    async fn select(&self, _table: &str, _query: &Query) -> Result<Vec<Value>, StoreError> {
        Err(unavailable())
    }

    async fn insert(&self, _table: &str, _record: &Value) -> Result<Vec<Value>, StoreError> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _table: &str,
        _record: &Value,
        _query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _table: &str, _query: &Query) -> Result<Vec<Value>, StoreError> {
        Err(unavailable())
    }
}

/// Store that accepts inserts but hands back no rows, as a misconfigured table can.
#[derive(Default)]
pub struct SilentInsertStore {
    inner: MemoryStore,
}

impl TableStore for SilentInsertStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.inner.select(table, query).await
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError> {
        self.inner.insert(table, record).await?;
        Ok(Vec::new())
    }

    async fn update(
        &self,
        table: &str,
        record: &Value,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        self.inner.update(table, record, query).await
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.inner.delete(table, query).await
    }
}

pub fn eiffel_tower() -> Value {
    json!({
        "name": "Eiffel Tower",
        "latitude": 48.8588443,
        "longitude": 2.2943506,
        "time_to_enjoy": 2.5,
        "category": "Historical"
    })
}

pub fn louvre() -> Value {
    json!({
        "name": "Louvre",
        "latitude": 48.8606111,
        "longitude": 2.337644,
        "time_to_enjoy": 4.0,
        "category": "Museum"
    })
}

pub fn notre_dame() -> Value {
    json!({
        "name": "Notre-Dame",
        "latitude": 48.852968,
        "longitude": 2.349902,
        "time_to_enjoy": 1.5,
        "category": "Historical"
    })
}

/// Drops the id so a response can be compared against the payload that created it.
pub fn without_id(mut record: Value) -> Value {
    if let Some(fields) = record.as_object_mut() {
        fields.remove("id");
    }
    record
}

pub async fn wait_for_server_ready(base_url: &str) {
    for _ in 0..30 {
        if reqwest::get(format!("{}/ready", base_url)).await.is_ok() {
            return;
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!("Server failed to start within timeout");
}

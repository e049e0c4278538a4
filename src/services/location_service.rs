use serde_json::Value;

use crate::db::{Query, StoreError, TableStore};
use crate::error::ApiError;
use crate::models::location::{Location, LocationResponse};

/// Typed location operations over one table of a `TableStore`.
pub struct LocationService<S> {
    store: S,
    table: String,
}

fn reshape(row: Value) -> Result<LocationResponse, StoreError> {
    serde_json::from_value(row).map_err(|e| {
        StoreError::ResponseError(format!("row does not match the location shape: {}", e))
    })
}

fn to_record(location: &Location) -> Result<Value, StoreError> {
    serde_json::to_value(location)
        .map_err(|e| StoreError::ResponseError(format!("Failed to encode location: {}", e)))
}

impl<S: TableStore> LocationService<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        LocationService {
            store,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// A successful query counts as healthy whether or not the table has rows.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store
            .select(&self.table, &Query::all().limit(1))
            .await
            .map(|_| ())
    }

    pub async fn create(&self, location: &Location) -> Result<LocationResponse, ApiError> {
        let rows = self.store.insert(&self.table, &to_record(location)?).await?;
        let row = rows.into_iter().next().ok_or_else(|| {
            StoreError::ResponseError("insert returned no rows".to_string())
        })?;
        Ok(reshape(row)?)
    }

    pub async fn list(&self) -> Result<Vec<LocationResponse>, ApiError> {
        let rows = self.store.select(&self.table, &Query::all()).await?;
        Ok(rows
            .into_iter()
            .map(reshape)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get(&self, id: i64) -> Result<LocationResponse, ApiError> {
        let rows = self
            .store
            .select(&self.table, &Query::all().eq("id", id).limit(1))
            .await?;
        let row = rows.into_iter().next().ok_or(ApiError::NotFound(id))?;
        Ok(reshape(row)?)
    }

    pub async fn update(&self, id: i64, location: &Location) -> Result<LocationResponse, ApiError> {
        let rows = self
            .store
            .update(&self.table, &to_record(location)?, &Query::all().eq("id", id))
            .await?;
        let row = rows.into_iter().next().ok_or(ApiError::NotFound(id))?;
        Ok(reshape(row)?)
    }

    /// Returns the deleted row. The row is already gone by the time it is
    /// reshaped, so a row that does not fit the location shape comes back as stored.
    pub async fn delete(&self, id: i64) -> Result<Value, ApiError> {
        let rows = self
            .store
            .delete(&self.table, &Query::all().eq("id", id))
            .await?;
        let row = rows.into_iter().next().ok_or(ApiError::NotFound(id))?;

        match reshape(row.clone()).and_then(|location| {
            serde_json::to_value(location)
                .map_err(|e| StoreError::ResponseError(format!("Failed to encode location: {}", e)))
        }) {
            Ok(reshaped) => Ok(reshaped),
            Err(err) => {
                log::warn!("Deleted location {} but could not reshape it: {}", id, err);
                Ok(row)
            }
        }
    }
}

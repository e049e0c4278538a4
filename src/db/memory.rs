use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{Query, StoreError, TableStore};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Map<String, Value>>,
}

/// Process-local table store. Ids are assigned sequentially per table,
/// starting at 1, and rows come back in id order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn project(row: &Map<String, Value>, columns: &str) -> Value {
    if columns.trim() == "*" {
        return Value::Object(row.clone());
    }
    let projected = columns
        .split(',')
        .map(str::trim)
        .filter_map(|column| row.get(column).map(|v| (column.to_string(), v.clone())))
        .collect();
    Value::Object(projected)
}

fn as_object(record: &Value) -> Result<&Map<String, Value>, StoreError> {
    record
        .as_object()
        .ok_or_else(|| StoreError::ResponseError("record must be a JSON object".to_string()))
}

impl TableStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(table) else {
            return Ok(Vec::new());
        };

        let rows = table
            .rows
            .values()
            .filter(|row| query.matches(row))
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|row| project(row, &query.columns))
            .collect();
        Ok(rows)
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError> {
        let mut fields = as_object(record)?.clone();
        let mut tables = self.tables.write().await;
        let table = tables.entry(table.to_string()).or_default();

        table.next_id += 1;
        let id = table.next_id;
        fields.insert("id".to_string(), Value::from(id));
        table.rows.insert(id, fields.clone());

        Ok(vec![Value::Object(fields)])
    }

    async fn update(
        &self,
        table: &str,
        record: &Value,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        let changes = as_object(record)?;
        let mut tables = self.tables.write().await;
        let Some(table) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in table.rows.values_mut() {
            if !query.matches(row) {
                continue;
            }
            for (column, value) in changes {
                // ids are owned by the store
                if column != "id" {
                    row.insert(column.clone(), value.clone());
                }
            }
            updated.push(Value::Object(row.clone()));
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(table) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let doomed: Vec<i64> = table
            .rows
            .iter()
            .filter(|(_, row)| query.matches(row))
            .map(|(id, _)| *id)
            .collect();

        Ok(doomed
            .into_iter()
            .filter_map(|id| table.rows.remove(&id))
            .map(Value::Object)
            .collect())
    }
}

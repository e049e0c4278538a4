pub mod memory;
pub mod supabase;

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    HttpError(reqwest::Error),
    StatusError { status: u16, body: String },
    ResponseError(String),
    ConfigError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::HttpError(err) => write!(f, "Store request failed: {}", err),
            StoreError::StatusError { status, body } => {
                write!(f, "Store returned status {}: {}", status, body)
            }
            StoreError::ResponseError(msg) => write!(f, "Unexpected store response: {}", msg),
            StoreError::ConfigError(msg) => write!(f, "Store configuration error: {}", msg),
        }
    }
}

impl Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::HttpError(err)
    }
}

/// Row selection: a column list, equality filters and an optional limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub columns: String,
    pub filters: Vec<(String, Value)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn select(columns: &str) -> Self {
        Query {
            columns: columns.to_string(),
            filters: Vec::new(),
            limit: None,
        }
    }

    pub fn all() -> Self {
        Self::select("*")
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a row passes every equality filter.
    pub fn matches(&self, row: &Map<String, Value>) -> bool {
        self.filters
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

/// A hosted table reachable over the network.
///
/// Every call returns the rows it selected or touched, which may be empty.
#[allow(async_fn_in_trait)]
pub trait TableStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError>;

    async fn update(
        &self,
        table: &str,
        record: &Value,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError>;

    async fn delete(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError>;
}

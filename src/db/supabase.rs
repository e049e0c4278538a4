use reqwest::{header, Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{Query, StoreError, TableStore};

/// Table access through a Supabase project's PostgREST endpoint.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    key: String,
}

pub fn create_supabase_store(
    url: &str,
    key: &str,
    timeout: Duration,
) -> Result<SupabaseStore, StoreError> {
    let parsed = Url::parse(url)
        .map_err(|e| StoreError::ConfigError(format!("invalid Supabase URL '{}': {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(StoreError::ConfigError(format!(
            "Supabase URL '{}' must use http or https",
            url
        )));
    }

    let client = Client::builder().timeout(timeout).build()?;

    log::info!("Using Supabase table store at {}", parsed);

    Ok(SupabaseStore {
        client,
        rest_url: format!("{}/rest/v1", parsed.as_str().trim_end_matches('/')),
        key: key.to_string(),
    })
}

/// PostgREST renders equality filters as `column=eq.value`.
pub fn filter_params(query: &Query) -> Vec<(String, String)> {
    query
        .filters
        .iter()
        .map(|(column, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (column.clone(), format!("eq.{}", rendered))
        })
        .collect()
}

pub fn select_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), query.columns.clone())];
    params.extend(filter_params(query));
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

impl SupabaseStore {
    fn request(&self, method: reqwest::Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", self.key.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.key))
    }

    fn returning(builder: RequestBuilder) -> RequestBuilder {
        builder.header("Prefer", "return=representation")
    }

    async fn rows(response: Response) -> Result<Vec<Value>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text)
            .map_err(|e| StoreError::ResponseError(format!("Failed to parse rows: {}", e)))
    }
}

impl TableStore for SupabaseStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        log::debug!("select from {} with {:?}", table, query);
        let response = self
            .request(reqwest::Method::GET, table)
            .query(&select_params(query))
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError> {
        log::debug!("insert into {}", table);
        let response = Self::returning(self.request(reqwest::Method::POST, table))
            .json(record)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn update(
        &self,
        table: &str,
        record: &Value,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        log::debug!("update {} with {:?}", table, query.filters);
        let response = Self::returning(self.request(reqwest::Method::PATCH, table))
            .query(&filter_params(query))
            .json(record)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        log::debug!("delete from {} with {:?}", table, query.filters);
        let response = Self::returning(self.request(reqwest::Method::DELETE, table))
            .query(&filter_params(query))
            .send()
            .await?;
        Self::rows(response).await
    }
}

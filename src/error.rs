use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

use crate::db::StoreError;
use crate::models::location::FieldError;

#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    NotFound(i64),
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(_) => write!(f, "Request validation failed"),
            ApiError::NotFound(id) => write!(f, "Location {} not found", id),
            ApiError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(fields) => {
                HttpResponse::build(self.status_code()).json(json!({
                    "error": self.to_string(),
                    "detail": fields,
                }))
            }
            ApiError::NotFound(_) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
            }
            ApiError::Store(err) => {
                log::error!("Store call failed: {}", err);
                HttpResponse::build(self.status_code())
                    .json(json!({ "error": format!("Database error: {}", err) }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::from(vec![FieldError::new("name", "field required")]);
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::NotFound(3).status_code(), StatusCode::NOT_FOUND);

        let store = ApiError::from(StoreError::ResponseError("no rows".to_string()));
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        assert_eq!(ApiError::NotFound(42).to_string(), "Location 42 not found");
    }
}

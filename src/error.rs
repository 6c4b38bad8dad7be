use axum::http::StatusCode;
use thiserror::Error;

use crate::models::HandlerResponse;

/// Error type shared by the record operations
///
/// Every variant is reported to the caller as a JSON string body of the form
/// `"Error: <message>"`. Only malformed input is a client error; everything
/// else, including a missing item on fetch-one, is a 500.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Request body, path parameter or payload shape is unusable
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// Point lookup found no item for the key
    #[error("Item not found: {pk}")]
    NotFound { pk: String },
    /// Provisioned throughput or request rate limits exceeded
    #[error("Throttled by DynamoDB: {0}")]
    Throttled(String),
    /// The backend could not be reached
    #[error("DynamoDB unavailable: {0}")]
    Unavailable(String),
    /// Any other backend failure (validation, missing table, ...)
    #[error("DynamoDB error: {0}")]
    Backend(String),
    /// A stored attribute has no JSON representation
    #[error("Unsupported attribute type: {0}")]
    UnsupportedType(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            // Absent items stay a 500 to match the deployed API contract.
            RecordError::NotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RecordError::Throttled(_)
            | RecordError::Unavailable(_)
            | RecordError::Backend(_)
            | RecordError::UnsupportedType(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_response(self) -> HandlerResponse {
        let status = self.status_code();
        if status.is_client_error() {
            tracing::warn!("Rejected request: {}", self);
        } else {
            tracing::error!("Request failed: {}", self);
        }
        HandlerResponse::message(status, format!("Error: {}", self))
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::MalformedInput(format!("JSON parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_maps_to_400() {
        let error = RecordError::MalformedInput("missing pk".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_500() {
        let error = RecordError::NotFound { pk: "1".to_string() };
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Item not found: 1");
    }

    #[test]
    fn test_backend_errors_map_to_500() {
        for error in [
            RecordError::Throttled("slow down".to_string()),
            RecordError::Unavailable("connection refused".to_string()),
            RecordError::Backend("table not found".to_string()),
            RecordError::UnsupportedType("binary".to_string()),
        ] {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_into_response_body_is_json_string() {
        let response = RecordError::Backend("boom".to_string()).into_response();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "\"Error: DynamoDB error: boom\"");
    }

    #[test]
    fn test_json_error_is_malformed_input() {
        let err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let error = RecordError::from(err);
        assert!(matches!(error, RecordError::MalformedInput(_)));
        assert!(error.to_string().starts_with("Malformed input: JSON parse error"));
    }
}

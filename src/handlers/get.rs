use crate::error::{RecordError, Result};
use crate::models::HandlerResponse;
use crate::store::RecordStore;
use crate::store::conversions::item_to_json;
use axum::http::StatusCode;
use serde_json::Value as JsonValue;

/// GET with an id - Retrieve one record by `pk`
pub async fn get_handler(store: &dyn RecordStore, id: &str) -> Result<HandlerResponse> {
    match store.get(id).await? {
        Some(item) => {
            let record = item_to_json(&item)?;
            tracing::info!("Successfully retrieved record with pk: {}", id);
            Ok(HandlerResponse::json(StatusCode::OK, JsonValue::Object(record)))
        }
        None => {
            tracing::info!("Record not found with pk: {}", id);
            Err(RecordError::NotFound { pk: id.to_string() })
        }
    }
}

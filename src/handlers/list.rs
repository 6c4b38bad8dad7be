use crate::error::Result;
use crate::models::HandlerResponse;
use crate::store::RecordStore;
use crate::store::conversions::item_to_json;
use axum::http::StatusCode;
use serde_json::Value as JsonValue;

/// GET without an id - List every record in the table
///
/// Returns a JSON array of records with numbers normalized. Only the first
/// scan page is listed.
pub async fn list_handler(store: &dyn RecordStore) -> Result<HandlerResponse> {
    let items = store.scan().await?;

    let records = items
        .iter()
        .map(|item| item_to_json(item).map(JsonValue::Object))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Listed {} records", records.len());
    Ok(HandlerResponse::json(StatusCode::OK, JsonValue::Array(records)))
}

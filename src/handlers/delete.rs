use crate::error::Result;
use crate::models::HandlerResponse;
use crate::store::RecordStore;
use axum::http::StatusCode;

/// DELETE - Remove the record with `pk` equal to the path id
///
/// Deleting a key that does not exist still succeeds.
pub async fn delete_handler(store: &dyn RecordStore, id: &str) -> Result<HandlerResponse> {
    store.delete(id).await?;

    tracing::info!("Successfully deleted record with pk: {}", id);
    Ok(HandlerResponse::message(StatusCode::OK, "Item deleted successfully"))
}

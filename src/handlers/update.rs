use crate::error::{RecordError, Result};
use crate::models::HandlerResponse;
use crate::store::conversions::{json_to_attribute, key_text};
use crate::store::{Item, KEY_ATTRIBUTE, RecordStore};
use axum::http::StatusCode;
use serde_json::{Map, Value as JsonValue};

/// PUT - Set the updatable attributes of the record named by the payload's `pk`
///
/// Only attributes in `updatable` are written; other payload fields are
/// ignored and other stored attributes are left as they are.
pub async fn update_handler(
    store: &dyn RecordStore,
    mut payload: Map<String, JsonValue>,
    updatable: &[String],
) -> Result<HandlerResponse> {
    let pk = match payload.remove(KEY_ATTRIBUTE) {
        Some(value) => key_text(&value).ok_or_else(|| {
            RecordError::MalformedInput("'pk' must be a string or a number".to_string())
        })?,
        None => {
            return Err(RecordError::MalformedInput("payload is missing 'pk'".to_string()));
        }
    };

    let mut changes = Item::new();
    for attribute in updatable {
        if let Some(value) = payload.remove(attribute) {
            changes.insert(attribute.clone(), json_to_attribute(value));
        }
    }

    if !payload.is_empty() {
        tracing::debug!(
            "Ignoring non-updatable attributes for pk {}: {:?}",
            pk,
            payload.keys().collect::<Vec<_>>()
        );
    }

    if changes.is_empty() {
        return Err(RecordError::MalformedInput(format!(
            "payload has none of the updatable attributes: {}",
            updatable.join(", ")
        )));
    }

    let count = changes.len();
    store.update(&pk, changes).await?;

    tracing::info!("Successfully updated {} attribute(s) of record with pk: {}", count, pk);
    Ok(HandlerResponse::message(StatusCode::OK, "Item updated successfully"))
}

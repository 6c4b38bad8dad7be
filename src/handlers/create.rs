use crate::error::Result;
use crate::models::HandlerResponse;
use crate::store::conversions::{json_to_item, key_text};
use crate::store::{KEY_ATTRIBUTE, RecordStore};
use axum::http::StatusCode;
use serde_json::{Map, Value as JsonValue};

/// POST - Store a record, replacing any record with the same `pk`
///
/// A numeric `pk` is stored as its string form, the same key PUT uses.
/// Any other payload is stored as given; a missing `pk` is left for the
/// table to reject.
pub async fn create_handler(
    store: &dyn RecordStore,
    mut payload: Map<String, JsonValue>,
) -> Result<HandlerResponse> {
    let pk = payload.get(KEY_ATTRIBUTE).and_then(key_text);
    if let Some(pk) = &pk {
        payload.insert(KEY_ATTRIBUTE.to_string(), JsonValue::String(pk.clone()));
    }

    store.put(json_to_item(payload)).await?;

    tracing::info!("Successfully stored record with pk: {}", pk.as_deref().unwrap_or("<none>"));
    Ok(HandlerResponse::message(StatusCode::CREATED, "Item created successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::store::InMemoryStore;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde_json::json;

    fn payload(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn test_create_record() {
        let store = InMemoryStore::new();

        let response = create_handler(&store, payload(json!({ "pk": "1", "name": "a" })))
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, "\"Item created successfully\"");
        let stored = store.get("1").await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&AttributeValue::S("a".to_string())));
    }

    #[tokio::test]
    async fn test_create_overwrites_existing_record() {
        let store = InMemoryStore::new();
        create_handler(&store, payload(json!({ "pk": "1", "name": "a", "color": "red" })))
            .await
            .unwrap();

        let response = create_handler(&store, payload(json!({ "pk": "1", "name": "b" })))
            .await
            .unwrap();

        assert_eq!(response.status_code, 201);
        let stored = store.get("1").await.unwrap().unwrap();
        assert_eq!(stored.get("name"), Some(&AttributeValue::S("b".to_string())));
        assert!(!stored.contains_key("color"));
    }

    #[tokio::test]
    async fn test_create_numeric_pk_is_stored_as_string() {
        let store = InMemoryStore::new();

        create_handler(&store, payload(json!({ "pk": 7, "name": "a" })))
            .await
            .unwrap();

        let stored = store.get("7").await.unwrap().unwrap();
        assert_eq!(stored.get("pk"), Some(&AttributeValue::S("7".to_string())));
    }

    #[tokio::test]
    async fn test_create_non_scalar_pk_is_backend_error() {
        let store = InMemoryStore::new();

        let err = create_handler(&store, payload(json!({ "pk": true, "name": "a" })))
            .await
            .unwrap_err();

        assert!(matches!(err, RecordError::Backend(_)));
    }

    #[tokio::test]
    async fn test_create_without_pk_is_backend_error() {
        let store = InMemoryStore::new();

        let err = create_handler(&store, payload(json!({ "name": "orphan" })))
            .await
            .unwrap_err();

        assert!(matches!(err, RecordError::Backend(_)));
        assert_eq!(err.into_response().status_code, 500);
    }
}

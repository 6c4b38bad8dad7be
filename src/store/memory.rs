//! In-memory record store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use crate::error::{RecordError, Result};

use super::{Item, KEY_ATTRIBUTE, RecordStore};

/// Map-backed store with the same key rules as the DynamoDB table.
///
/// Items are kept ordered by key so scans are deterministic. Data lives only
/// as long as the store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_key(pk: &str) -> Result<()> {
    if pk.is_empty() {
        return Err(RecordError::Backend(
            "One or more parameter values are not valid. The AttributeValue for a key attribute cannot contain an empty string value. Key: pk".to_string(),
        ));
    }
    Ok(())
}

fn item_key(item: &Item) -> Result<String> {
    match item.get(KEY_ATTRIBUTE) {
        Some(AttributeValue::S(pk)) => {
            check_key(pk)?;
            Ok(pk.clone())
        }
        Some(_) => Err(RecordError::Backend(
            "One or more parameter values were invalid: Type mismatch for key pk expected: S".to_string(),
        )),
        None => Err(RecordError::Backend(
            "One or more parameter values were invalid: Missing the key pk in the item".to_string(),
        )),
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn scan(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn get(&self, pk: &str) -> Result<Option<Item>> {
        check_key(pk)?;
        let items = self.items.read().await;
        Ok(items.get(pk).cloned())
    }

    async fn put(&self, item: Item) -> Result<()> {
        let pk = item_key(&item)?;
        let mut items = self.items.write().await;
        items.insert(pk, item);
        Ok(())
    }

    async fn update(&self, pk: &str, attributes: Item) -> Result<()> {
        check_key(pk)?;
        let mut items = self.items.write().await;
        let item = items.entry(pk.to_string()).or_insert_with(|| {
            Item::from([(KEY_ATTRIBUTE.to_string(), AttributeValue::S(pk.to_string()))])
        });
        item.extend(attributes);
        Ok(())
    }

    async fn delete(&self, pk: &str) -> Result<()> {
        check_key(pk)?;
        let mut items = self.items.write().await;
        items.remove(pk);
        Ok(())
    }
}

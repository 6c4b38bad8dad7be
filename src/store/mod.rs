//! Record storage.
//!
//! [`RecordStore`] is the seam between the record operations and the table.
//! `DynamoDbStore` talks to DynamoDB through `aws-sdk-dynamodb`;
//! `InMemoryStore` keeps items in a map and backs the tests and the
//! `STORAGE_BACKEND=memory` local mode.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::Result;

pub mod conversions;
pub mod dynamodb;
pub mod memory;

pub use dynamodb::DynamoDbStore;
pub use memory::InMemoryStore;

/// Name of the table's partition key attribute.
pub const KEY_ATTRIBUTE: &str = "pk";

/// A stored item, as DynamoDB represents it.
pub type Item = HashMap<String, AttributeValue>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every item in the table (a single scan page).
    async fn scan(&self) -> Result<Vec<Item>>;

    /// Point lookup by partition key.
    async fn get(&self, pk: &str) -> Result<Option<Item>>;

    /// Insert or fully replace an item.
    async fn put(&self, item: Item) -> Result<()>;

    /// Set the given attributes on the item with key `pk`, leaving the rest as they are.
    ///
    /// An absent item is created holding only the key and the given attributes.
    async fn update(&self, pk: &str, attributes: Item) -> Result<()>;

    /// Remove an item. Removing an absent key is not an error.
    async fn delete(&self, pk: &str) -> Result<()>;
}

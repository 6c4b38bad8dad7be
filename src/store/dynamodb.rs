//! DynamoDB record store.

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;

use crate::config::Config;
use crate::error::{RecordError, Result};

use super::{Item, KEY_ATTRIBUTE, RecordStore};

/// Store backed by a single DynamoDB table keyed on `pk`.
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store from configuration
    ///
    /// Credentials and region come from the AWS default provider chain.
    /// `DYNAMODB_ENDPOINT_URL` redirects the client, e.g. to DynamoDB Local.
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.dynamodb_endpoint_url {
            tracing::info!("Using DynamoDB endpoint: {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        } else {
            tracing::info!("Using default DynamoDB endpoint");
        }

        let store = Self::new(Client::from_conf(builder.build()), config.table_name.clone());
        tracing::info!("DynamoDB store ready for table: {}", store.table_name());
        store
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(pk: &str) -> (String, AttributeValue) {
        (KEY_ATTRIBUTE.to_string(), AttributeValue::S(pk.to_string()))
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn scan(&self) -> Result<Vec<Item>> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "Scan"))?;

        // Only the first page is returned.
        if output.last_evaluated_key.is_some() {
            tracing::warn!(
                "Scan of {} returned a partial page; remaining items are not listed",
                self.table_name
            );
        }

        let items = output.items.unwrap_or_default();
        tracing::debug!("Scanned {} items from {}", items.len(), self.table_name);
        Ok(items)
    }

    async fn get(&self, pk: &str) -> Result<Option<Item>> {
        let (name, value) = Self::key(pk);
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(name, value)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "GetItem"))?;

        Ok(output.item)
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "PutItem"))?;

        Ok(())
    }

    async fn update(&self, pk: &str, attributes: Item) -> Result<()> {
        let update = UpdateExpression::set(attributes)?;
        let (name, value) = Self::key(pk);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key(name, value)
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "UpdateItem"))?;

        Ok(())
    }

    async fn delete(&self, pk: &str) -> Result<()> {
        let (name, value) = Self::key(pk);
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(name, value)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "DeleteItem"))?;

        Ok(())
    }
}

/// `SET` expression with placeholder names and values for an UpdateItem call.
#[derive(Debug, PartialEq)]
struct UpdateExpression {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    fn set(attributes: Item) -> Result<Self> {
        if attributes.is_empty() {
            return Err(RecordError::MalformedInput("no attributes to update".to_string()));
        }

        let mut attributes: Vec<_> = attributes.into_iter().collect();
        attributes.sort_by(|a, b| a.0.cmp(&b.0));

        let mut clauses = Vec::with_capacity(attributes.len());
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        for (index, (name, value)) in attributes.into_iter().enumerate() {
            let name_placeholder = format!("#attr{}", index);
            let value_placeholder = format!(":val{}", index);
            clauses.push(format!("{} = {}", name_placeholder, value_placeholder));
            names.insert(name_placeholder, name);
            values.insert(value_placeholder, value);
        }

        Ok(Self {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        })
    }
}

/// Map an SDK error for `operation` to a RecordError.
fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> RecordError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => RecordError::Unavailable(
            format!("{} failed: {}", operation, DisplayErrorContext(&err)),
        ),
        SdkError::ServiceError(service) => {
            let source = service.err();
            let message = source
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
            classify_service_error(operation, source.code(), message)
        }
        _ => RecordError::Backend(format!("{} failed: {}", operation, DisplayErrorContext(&err))),
    }
}

fn classify_service_error(operation: &str, code: Option<&str>, message: String) -> RecordError {
    match code {
        Some("ProvisionedThroughputExceededException")
        | Some("RequestLimitExceeded")
        | Some("ThrottlingException") => {
            RecordError::Throttled(format!("{} failed: {}", operation, message))
        }
        Some("ResourceNotFoundException") => {
            RecordError::Backend(format!("{} failed: table not found: {}", operation, message))
        }
        Some("InternalServerError") | Some("ServiceUnavailable") => {
            RecordError::Unavailable(format!("{} failed: {}", operation, message))
        }
        Some(code) => RecordError::Backend(format!("{} failed ({}): {}", operation, code, message)),
        None => RecordError::Backend(format!("{} failed: {}", operation, message)),
    }
}

use std::env;
use anyhow::{bail, Context, Result};

/// Which record store the process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    DynamoDb,
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StorageBackend::DynamoDb),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!(
                "STORAGE_BACKEND must be one of: dynamodb, memory, got '{}'",
                other
            ),
        }
    }
}

/// Log output format, picked from the runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON lines without colours, for CloudWatch
    Json,
    Pretty,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub dynamodb_endpoint_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub updatable_attributes: Vec<String>,
    pub lambda_runtime_api: Option<String>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let table_name = env::var("DYNAMODB_TABLE_NAME")
            .context("DYNAMODB_TABLE_NAME environment variable is required")?;
        if table_name.trim().is_empty() {
            bail!("DYNAMODB_TABLE_NAME must not be empty");
        }

        let dynamodb_endpoint_url = env::var("DYNAMODB_ENDPOINT_URL").ok();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => StorageBackend::parse(&value)?,
            Err(_) => StorageBackend::DynamoDb,
        };

        let updatable_attributes = parse_attribute_list(
            &env::var("UPDATABLE_ATTRIBUTES").unwrap_or_else(|_| "name".to_string()),
        );
        if updatable_attributes.is_empty() {
            bail!("UPDATABLE_ATTRIBUTES must name at least one attribute");
        }
        if updatable_attributes.iter().any(|attr| attr == "pk") {
            bail!("UPDATABLE_ATTRIBUTES must not contain the key attribute 'pk'");
        }

        let lambda_runtime_api = env::var("AWS_LAMBDA_RUNTIME_API").ok();

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            table_name,
            dynamodb_endpoint_url,
            storage_backend,
            updatable_attributes,
            lambda_runtime_api,
            service_port,
            service_host,
        })
    }

    /// True when the process was started by the Lambda service
    pub fn is_lambda(&self) -> bool {
        self.lambda_runtime_api.is_some()
    }

    pub fn log_format(&self) -> LogFormat {
        if self.is_lambda() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  DynamoDB table: {}", self.table_name);
        tracing::info!("  DynamoDB endpoint: {}",
            self.dynamodb_endpoint_url.as_deref().unwrap_or("default (AWS)"));
        tracing::info!("  Storage backend: {:?}", self.storage_backend);
        tracing::info!("  Updatable attributes: {}", self.updatable_attributes.join(", "));
        if self.is_lambda() {
            tracing::info!("  Runtime: AWS Lambda");
        } else {
            tracing::info!("  Runtime: local, listening on {}:{}", self.service_host, self.service_port);
        }
    }
}

fn parse_attribute_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|attr| !attr.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        table_name: "records-test".to_string(),
        dynamodb_endpoint_url: None,
        storage_backend: StorageBackend::Memory,
        updatable_attributes: vec!["name".to_string()],
        lambda_runtime_api: None,
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    }
}

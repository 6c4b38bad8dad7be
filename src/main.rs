mod config;
mod dispatch;
mod error;
mod handlers;
mod lambda;
mod models;
mod normalize;
mod routes;
mod server;
mod state;
mod store;

use std::sync::Arc;

use config::{Config, LogFormat, StorageBackend};
use state::AppState;
use store::{DynamoDbStore, InMemoryStore, RecordStore};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format());

    tracing::info!("dynamo-crud starting");
    config.log_startup();

    let store: Arc<dyn RecordStore> = match config.storage_backend {
        StorageBackend::DynamoDb => Arc::new(DynamoDbStore::from_config(&config).await),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on exit");
            Arc::new(InMemoryStore::new())
        }
    };

    let is_lambda = config.is_lambda();
    let state = AppState::new(store, config);

    if is_lambda {
        lambda::run(state).await
    } else {
        server::serve(state).await
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .without_time()
                    .with_current_span(true),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

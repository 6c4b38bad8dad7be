use crate::config::Config;
use crate::store::RecordStore;
use std::sync::Arc;

/// Shared application state
///
/// Built once per process and handed to every invocation.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

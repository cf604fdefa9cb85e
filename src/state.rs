use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::CounterConfig;
use crate::errors::CounterError;
use crate::storage::FileDocumentStore;

/// Resolved configuration plus the store handle. The mutex serializes the
/// read-increment-replace cycle, so concurrent visits never lose an update.
pub struct CounterBackend {
    pub config: CounterConfig,
    pub store: Mutex<FileDocumentStore>,
}

impl CounterBackend {
    pub fn new(config: CounterConfig) -> Self {
        let store = FileDocumentStore::new(config.container_path());
        Self {
            config,
            store: Mutex::new(store),
        }
    }
}

/// A backend that failed to resolve is kept as its error so every request
/// can report the same structured failure instead of the server refusing to
/// start.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Result<CounterBackend, CounterError>>,
}

impl AppState {
    pub fn new(backend: Result<CounterBackend, CounterError>) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_env() -> Self {
        Self::new(CounterConfig::from_env().map(CounterBackend::new))
    }
}

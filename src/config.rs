use std::env;
use std::path::PathBuf;

use crate::errors::CounterError;

pub const STORE_PATH_VAR: &str = "COUNTER_STORE_PATH";
pub const DATABASE_VAR: &str = "COUNTER_DATABASE_NAME";
pub const CONTAINER_VAR: &str = "COUNTER_CONTAINER_NAME";

const DEFAULT_DATABASE: &str = "resume";
const DEFAULT_CONTAINER: &str = "visits";

/// Where the counter lives: a store root on disk plus the database and
/// container names that select one container file beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    pub store_path: PathBuf,
    pub database: String,
    pub container: String,
}

impl CounterConfig {
    pub fn from_env() -> Result<Self, CounterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CounterError> {
        let store_path = lookup(STORE_PATH_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(CounterError::ConfigurationMissing(STORE_PATH_VAR))?;

        Ok(Self {
            store_path: PathBuf::from(store_path),
            database: lookup(DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            container: lookup(CONTAINER_VAR).unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
        })
    }

    pub fn container_path(&self) -> PathBuf {
        self.store_path
            .join(&self.database)
            .join(format!("{}.json", self.container))
    }
}

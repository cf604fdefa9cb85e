use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::error;

use crate::errors::CounterError;

pub const STORE_SOURCE: &str = "JSON document store";

type Documents = BTreeMap<String, Value>;

/// Document access the counter needs: whole documents in, whole documents
/// out, addressed by id. A replace carries the full document, never a patch.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn read(&self, id: &str) -> Result<Option<Value>, CounterError>;
    async fn replace(&self, id: &str, document: Value) -> Result<(), CounterError>;
    async fn create(&self, id: &str, document: Value) -> Result<(), CounterError>;
}

/// One container file under `<store root>/<database>/<container>.json`,
/// holding every document of the container keyed by id.
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Documents, CounterError> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                // Never fall back to an empty container here: that would
                // silently reset the count.
                error!("container file {} is corrupt: {err}", self.path.display());
                CounterError::StoreUnavailable(format!(
                    "container file {} is corrupt: {err}",
                    self.path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Documents::new()),
            Err(err) => Err(io_error(&self.path, &err)),
        }
    }

    async fn persist(&self, documents: &Documents) -> Result<(), CounterError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| io_error(parent, &err))?;
        }
        let payload = serde_json::to_vec_pretty(documents)
            .map_err(|err| CounterError::StoreUnavailable(err.to_string()))?;
        fs::write(&self.path, payload)
            .await
            .map_err(|err| io_error(&self.path, &err))
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> CounterError {
    let detail = format!("{}: {err}", path.display());
    if err.kind() == ErrorKind::PermissionDenied {
        CounterError::StoreUnauthorized(detail)
    } else {
        CounterError::StoreUnavailable(detail)
    }
}

impl DocumentStore for FileDocumentStore {
    async fn read(&self, id: &str) -> Result<Option<Value>, CounterError> {
        let mut documents = self.load().await?;
        Ok(documents.remove(id))
    }

    async fn replace(&self, id: &str, document: Value) -> Result<(), CounterError> {
        let mut documents = self.load().await?;
        documents.insert(id.to_string(), document);
        self.persist(&documents).await
    }

    // An upsert: a malformed document must be rebuildable in place.
    async fn create(&self, id: &str, document: Value) -> Result<(), CounterError> {
        self.replace(id, document).await
    }
}

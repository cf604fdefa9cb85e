use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::CounterError;
use crate::models::{COUNTER_ID, CounterRecord, CounterSnapshot};
use crate::storage::DocumentStore;

/// One read-increment-replace cycle against the counter document. The caller
/// serializes invocations; no retries happen here.
pub async fn record_visit<S: DocumentStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<CounterSnapshot, CounterError> {
    match store.read(COUNTER_ID).await? {
        Some(document) => match document.get("count").and_then(Value::as_u64) {
            Some(previous) => increment(store, document, previous, now).await,
            None => {
                warn!(
                    "counter document '{COUNTER_ID}' exists but carries no usable count, rebuilding it"
                );
                create_initial(store, now).await
            }
        },
        None => create_initial(store, now).await,
    }
}

async fn increment<S: DocumentStore>(
    store: &S,
    mut document: Value,
    previous: u64,
    now: DateTime<Utc>,
) -> Result<CounterSnapshot, CounterError> {
    let count = previous.saturating_add(1);
    // Mutate the stored document in place so fields this service does not
    // know about survive the replace.
    document["count"] = Value::from(count);
    document["lastUpdated"] = Value::from(now.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    store.replace(COUNTER_ID, document).await?;

    info!("visit counter incremented to {count}");
    Ok(CounterSnapshot {
        count,
        last_updated: now,
    })
}

async fn create_initial<S: DocumentStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<CounterSnapshot, CounterError> {
    let record = CounterRecord::initial(now);
    let document = serde_json::to_value(&record)
        .map_err(|err| CounterError::StoreUnavailable(err.to_string()))?;
    store.create(COUNTER_ID, document).await?;

    info!("created visit counter document at count 1");
    Ok(CounterSnapshot {
        count: record.count,
        last_updated: now,
    })
}

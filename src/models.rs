use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CounterConfig;
use crate::storage::STORE_SOURCE;

/// Identifier of the single counter document; one record serves the site.
pub const COUNTER_ID: &str = "resumeCounter";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    pub id: String,
    pub count: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

impl CounterRecord {
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            id: COUNTER_ID.to_string(),
            count: 1,
            last_updated: now,
            created_at: now,
            kind: default_kind(),
            description: "Resume site visit counter".to_string(),
        }
    }
}

fn default_kind() -> String {
    "visitCounter".to_string()
}

/// What one successful increment observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub count: u64,
    pub last_updated: DateTime<Utc>,
}

/// Optional page-load context sent by the client. None of it affects the
/// count; it only feeds the request log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitPayload {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_referrer")]
    pub referrer: String,
}

fn default_referrer() -> String {
    "direct".to_string()
}

impl VisitPayload {
    /// User agent capped at 100 characters for logging.
    pub fn short_user_agent(&self) -> &str {
        let agent = self.user_agent.as_deref().unwrap_or("unknown");
        match agent.char_indices().nth(100) {
            Some((cut, _)) => &agent[..cut],
            None => agent,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterResponse {
    pub success: bool,
    pub count: u64,
    pub last_updated: DateTime<Utc>,
    pub message: String,
    pub source: String,
    pub database: String,
    pub container: String,
}

impl CounterResponse {
    pub fn new(snapshot: CounterSnapshot, config: &CounterConfig) -> Self {
        Self {
            success: true,
            count: snapshot.count,
            last_updated: snapshot.last_updated,
            message: format!(
                "Counter: {} (connected to {}.{})",
                snapshot.count, config.database, config.container
            ),
            source: STORE_SOURCE.to_string(),
            database: config.database.clone(),
            container: config.container.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CounterFailure {
    pub success: bool,
    pub error: String,
    pub count: u64,
    pub message: String,
    pub troubleshooting: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn config() -> CounterConfig {
        CounterConfig {
            store_path: PathBuf::from("/tmp/store"),
            database: "resume".to_string(),
            container: "visits".to_string(),
        }
    }

    #[test]
    fn initial_record_starts_at_one_with_matching_timestamps() {
        let now = Utc.with_ymd_and_hms(2026, 1, 8, 20, 40, 38).unwrap();
        let record = CounterRecord::initial(now);
        assert_eq!(record.id, COUNTER_ID);
        assert_eq!(record.count, 1);
        assert_eq!(record.created_at, record.last_updated);
        assert_eq!(record.kind, "visitCounter");
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2026, 1, 8, 20, 40, 38).unwrap();
        let value = serde_json::to_value(CounterRecord::initial(now)).unwrap();
        assert!(value.get("lastUpdated").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["type"], "visitCounter");
    }

    #[test]
    fn success_response_names_database_and_container() {
        let now = Utc.with_ymd_and_hms(2026, 1, 8, 20, 40, 38).unwrap();
        let snapshot = CounterSnapshot {
            count: 43,
            last_updated: now,
        };
        let response = CounterResponse::new(snapshot, &config());
        assert!(response.success);
        assert_eq!(response.count, 43);
        assert_eq!(response.message, "Counter: 43 (connected to resume.visits)");
        assert_eq!(response.database, "resume");
        assert_eq!(response.container, "visits");
    }

    #[test]
    fn payload_referrer_defaults_to_direct() {
        let payload: VisitPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.referrer, "direct");
        assert!(payload.page.is_none());
    }

    #[test]
    fn long_user_agent_is_capped_at_100_characters() {
        let payload: VisitPayload = serde_json::from_value(serde_json::json!({
            "userAgent": "x".repeat(250),
        }))
        .unwrap();
        assert_eq!(payload.short_user_agent().chars().count(), 100);
    }
}

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{CounterResponse, CounterSnapshot};

/// Every exact multiple of this count gets a celebration.
pub const MILESTONE_INTERVAL: u64 = 10;
/// Shown when neither the service nor the cache can supply a count.
pub const PLACEHOLDER_COUNT: &str = "1";
/// localStorage key holding the last successful snapshot.
pub const CACHE_KEY: &str = "lastCounterData";

/// Last successfully observed count, kept only as a degraded-mode display
/// aid. Never written back to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedCounterSnapshot {
    pub count: u64,
    pub last_updated: DateTime<Utc>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("counter call returned HTTP {0}")]
    BadStatus(u16),
    #[error("counter response body did not parse: {0}")]
    MalformedBody(String),
    #[error("counter service reported a failure: {0}")]
    ServiceFailure(String),
    #[error("counter call failed: {0}")]
    Network(String),
}

/// Terminal display state; the fallback chain always ends in one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum CounterView {
    Live {
        count: u64,
        last_updated: DateTime<Utc>,
        milestone: bool,
    },
    Cached {
        count: u64,
        last_updated: DateTime<Utc>,
    },
    Placeholder,
}

impl CounterView {
    pub fn display_text(&self) -> String {
        match self {
            Self::Live { count, .. } | Self::Cached { count, .. } => format_count(*count),
            Self::Placeholder => PLACEHOLDER_COUNT.to_string(),
        }
    }

    pub fn opacity(&self) -> &'static str {
        match self {
            Self::Live { .. } => "1",
            Self::Cached { .. } => "0.8",
            Self::Placeholder => "0.7",
        }
    }

    pub fn status_line(&self) -> Option<String> {
        match self {
            Self::Live { last_updated, .. } => Some(format!(
                "Visit count was last updated: {}",
                format_last_updated(last_updated)
            )),
            Self::Cached { last_updated, .. } => Some(format!(
                "Last known update: {}",
                format_last_updated(last_updated)
            )),
            Self::Placeholder => None,
        }
    }

    pub fn celebrates_milestone(&self) -> bool {
        matches!(self, Self::Live { milestone: true, .. })
    }
}

/// Turns a raw HTTP outcome into a snapshot or a reason to fall back. Only a
/// 2xx status with a parseable body carrying `success: true` counts.
pub fn classify_response(status: u16, body: &str) -> Result<CounterSnapshot, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::BadStatus(status));
    }

    let value: Value =
        serde_json::from_str(body).map_err(|err| ClientError::MalformedBody(err.to_string()))?;
    if value.get("success").and_then(Value::as_bool) != Some(true) {
        let detail = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("success flag missing or false");
        return Err(ClientError::ServiceFailure(detail.to_string()));
    }

    let response: CounterResponse =
        serde_json::from_value(value).map_err(|err| ClientError::MalformedBody(err.to_string()))?;
    Ok(CounterSnapshot {
        count: response.count,
        last_updated: response.last_updated,
    })
}

/// The fallback chain: success refreshes the cache and renders live; any
/// failure renders the cache unchanged, or the placeholder when there is
/// none. Never errors.
pub fn resolve_view(
    outcome: Result<CounterSnapshot, ClientError>,
    cache: Option<CachedCounterSnapshot>,
    now: DateTime<Utc>,
) -> (CounterView, Option<CachedCounterSnapshot>) {
    match outcome {
        Ok(snapshot) => {
            let view = CounterView::Live {
                count: snapshot.count,
                last_updated: snapshot.last_updated,
                milestone: is_milestone(snapshot.count),
            };
            let refreshed = CachedCounterSnapshot {
                count: snapshot.count,
                last_updated: snapshot.last_updated,
                timestamp: now.timestamp_millis(),
            };
            (view, Some(refreshed))
        }
        Err(err) => {
            debug!("counter call failed, falling back: {err}");
            match cache {
                Some(snapshot) => (
                    CounterView::Cached {
                        count: snapshot.count,
                        last_updated: snapshot.last_updated,
                    },
                    Some(snapshot),
                ),
                None => (CounterView::Placeholder, None),
            }
        }
    }
}

pub fn is_milestone(count: u64) -> bool {
    count > 0 && count % MILESTONE_INTERVAL == 0
}

/// Thousands grouping, the way the browser's locale formatting renders it.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `1/8/2026, 8:40:38 PM`
pub fn format_last_updated<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 8, hour, 40, 38).unwrap()
    }

    fn success_body(count: u64) -> String {
        serde_json::json!({
            "success": true,
            "count": count,
            "lastUpdated": "2026-01-08T20:40:38Z",
            "message": format!("Counter: {count} (connected to resume.visits)"),
            "source": "JSON document store",
            "database": "resume",
            "container": "visits",
        })
        .to_string()
    }

    #[test]
    fn successful_body_classifies_as_snapshot() {
        let snapshot = classify_response(200, &success_body(43)).unwrap();
        assert_eq!(snapshot.count, 43);
    }

    #[test]
    fn bad_status_malformed_body_and_failure_flag_classify_apart() {
        assert_eq!(
            classify_response(500, &success_body(1)),
            Err(ClientError::BadStatus(500))
        );
        assert!(matches!(
            classify_response(200, "not json"),
            Err(ClientError::MalformedBody(_))
        ));
        assert_eq!(
            classify_response(200, r#"{"success":false,"error":"store down","count":0}"#),
            Err(ClientError::ServiceFailure("store down".to_string()))
        );
    }

    #[test]
    fn success_refreshes_cache_and_renders_live() {
        let snapshot = CounterSnapshot {
            count: 43,
            last_updated: at(20),
        };
        let (view, cache) = resolve_view(Ok(snapshot), None, at(21));

        assert_eq!(view.display_text(), "43");
        assert_eq!(view.opacity(), "1");
        assert!(
            view.status_line()
                .unwrap()
                .starts_with("Visit count was last updated: 1/8/2026")
        );
        assert!(!view.celebrates_milestone());
        assert_eq!(cache.unwrap().count, 43);
    }

    #[test]
    fn failure_with_cache_renders_cached_at_reduced_opacity() {
        let cached = CachedCounterSnapshot {
            count: 43,
            last_updated: at(20),
            timestamp: at(20).timestamp_millis(),
        };
        let (view, cache) = resolve_view(
            Err(ClientError::Network("offline".to_string())),
            Some(cached.clone()),
            at(22),
        );

        assert_eq!(view.display_text(), "43");
        assert_eq!(view.opacity(), "0.8");
        assert_eq!(
            view.status_line().unwrap(),
            format!("Last known update: {}", format_last_updated(&at(20)))
        );
        // the cache entry itself is untouched
        assert_eq!(cache, Some(cached));
    }

    #[test]
    fn repeated_failures_render_the_same_cached_value() {
        let cached = CachedCounterSnapshot {
            count: 43,
            last_updated: at(20),
            timestamp: 0,
        };
        let mut cache = Some(cached);
        let mut texts = Vec::new();
        for attempt in 0..3 {
            let (view, next) = resolve_view(
                Err(ClientError::BadStatus(500 + attempt)),
                cache.clone(),
                at(23),
            );
            texts.push(view.display_text());
            cache = next;
        }
        assert_eq!(texts, vec!["43", "43", "43"]);
    }

    #[test]
    fn failure_without_cache_renders_the_placeholder() {
        let (view, cache) = resolve_view(
            Err(ClientError::MalformedBody("eof".to_string())),
            None,
            at(22),
        );
        assert_eq!(view, CounterView::Placeholder);
        assert_eq!(view.display_text(), "1");
        assert_eq!(view.opacity(), "0.7");
        assert_eq!(view.status_line(), None);
        assert_eq!(cache, None);
    }

    #[test]
    fn milestones_fire_exactly_on_positive_multiples_of_ten() {
        assert!(is_milestone(10));
        assert!(is_milestone(50));
        assert!(is_milestone(1000));
        assert!(!is_milestone(0));
        assert!(!is_milestone(43));
        assert!(!is_milestone(101));

        let snapshot = CounterSnapshot {
            count: 50,
            last_updated: at(20),
        };
        let (view, _) = resolve_view(Ok(snapshot), None, at(20));
        assert!(view.celebrates_milestone());
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn last_updated_formats_like_the_original_page() {
        let evening = Utc.with_ymd_and_hms(2026, 1, 8, 20, 40, 38).unwrap();
        assert_eq!(format_last_updated(&evening), "1/8/2026, 8:40:38 PM");

        let morning = Utc.with_ymd_and_hms(2026, 11, 23, 9, 5, 2).unwrap();
        assert_eq!(format_last_updated(&morning), "11/23/2026, 9:05:02 AM");
    }
}

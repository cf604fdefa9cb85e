use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use thiserror::Error;

use crate::config::STORE_PATH_VAR;
use crate::models::CounterFailure;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CounterError {
    #[error("{0} is not set in the environment")]
    ConfigurationMissing(&'static str),
    #[error("cannot reach the counter store: {0}")]
    StoreUnavailable(String),
    #[error("counter store refused access: {0}")]
    StoreUnauthorized(String),
}

impl CounterError {
    pub fn failure(&self) -> CounterFailure {
        let error = match self {
            Self::ConfigurationMissing(key) => {
                format!("{key} is not set in the environment")
            }
            Self::StoreUnavailable(detail) => format!(
                "Cannot reach the counter store. Check: 1) the store directory exists, \
                 2) the volume holding it is mounted, 3) {STORE_PATH_VAR} points at it ({detail})"
            ),
            Self::StoreUnauthorized(detail) => {
                format!("Unauthorized. Check file permissions on the counter store directory ({detail})")
            }
        };

        CounterFailure {
            success: false,
            error,
            count: 0,
            message: "Failed to reach the counter store".to_string(),
            troubleshooting: vec![
                format!("1. Verify {STORE_PATH_VAR} points at a writable directory"),
                "2. Check the directory exists and is owned by the service user".to_string(),
                "3. Ensure the volume holding the store is mounted".to_string(),
                "4. Reload the page once the store is reachable again".to_string(),
            ],
        }
    }
}

impl IntoResponse for CounterError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(self.failure()),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configuration_names_the_variable() {
        let failure = CounterError::ConfigurationMissing(STORE_PATH_VAR).failure();
        assert!(!failure.success);
        assert_eq!(failure.count, 0);
        assert!(failure.error.contains(STORE_PATH_VAR));
        assert!(!failure.troubleshooting.is_empty());
    }

    #[test]
    fn unavailable_and_unauthorized_hints_differ() {
        let unavailable = CounterError::StoreUnavailable("disk gone".to_string()).failure();
        let unauthorized = CounterError::StoreUnauthorized("mode 000".to_string()).failure();
        assert!(unavailable.error.contains("Cannot reach"));
        assert!(unauthorized.error.contains("Unauthorized"));
        assert_ne!(unavailable.error, unauthorized.error);
    }
}

//! Connection settings for the remote employee API.
//!
//! Credentials are injected, never compiled in: either constructed directly
//! or read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const ENV_BASE_URL: &str = "EMPLOYEE_API_BASE_URL";
pub const ENV_CUSTOMER_ID: &str = "EMPLOYEE_API_CUSTOMER_ID";
pub const ENV_API_KEY: &str = "EMPLOYEE_API_KEY";
pub const ENV_UPDATED_BY: &str = "EMPLOYEE_API_UPDATED_BY";
pub const ENV_TIMEOUT_SECS: &str = "EMPLOYEE_API_TIMEOUT_SECS";

/// Actor label written to `LastUpdatedBy` unless overridden.
pub const DEFAULT_UPDATED_BY: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct ApiConfig {
    /// Collection endpoint, e.g. `https://host/HRDemo/Employees`.
    pub base_url: String,
    pub customer_id: String,
    pub api_key: String,
    pub updated_by: String,
    /// `None` leaves the transport's default in place.
    pub timeout: Option<Duration>,
}

// Hand-written so the API key never ends up in logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("customer_id", &self.customer_id)
            .field("api_key", &"<redacted>")
            .field("updated_by", &self.updated_by)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        customer_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            customer_id: customer_id.into(),
            api_key: api_key.into(),
            updated_by: DEFAULT_UPDATED_BY.to_string(),
            timeout: None,
        }
    }

    pub fn with_updated_by(mut self, updated_by: impl Into<String>) -> Self {
        self.updated_by = updated_by.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a caller-supplied lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let mut config = Self::new(
            required(ENV_BASE_URL)?,
            required(ENV_CUSTOMER_ID)?,
            required(ENV_API_KEY)?,
        );

        if let Some(updated_by) = lookup(ENV_UPDATED_BY).filter(|v| !v.trim().is_empty()) {
            config.updated_by = updated_by;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_required_values_and_defaults() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:3000/Employees/"),
            (ENV_CUSTOMER_ID, "cust"),
            (ENV_API_KEY, "key"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/Employees");
        assert_eq!(config.customer_id, "cust");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.updated_by, DEFAULT_UPDATED_BY);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn from_lookup_reports_first_missing_variable() {
        let err = ApiConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "http://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_CUSTOMER_ID));
        assert_eq!(err.to_string(), "EMPLOYEE_API_CUSTOMER_ID must be set");
    }

    #[test]
    fn from_lookup_treats_blank_as_missing() {
        let err = ApiConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://x"),
            (ENV_CUSTOMER_ID, "cust"),
            (ENV_API_KEY, "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_API_KEY));
    }

    #[test]
    fn from_lookup_parses_optional_settings() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://x"),
            (ENV_CUSTOMER_ID, "cust"),
            (ENV_API_KEY, "key"),
            (ENV_UPDATED_BY, "hr-bot"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.updated_by, "hr-bot");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ApiConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://x"),
            (ENV_CUSTOMER_ID, "cust"),
            (ENV_API_KEY, "key"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ApiConfig::new("http://x", "cust", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

use std::time::Duration;

use url::Url;

use crate::error::{LocatorError, Result};
use crate::query::DEFAULT_API_URL;

pub const DEFAULT_CSV_PATH: &str = "37231365-78ba-44d5-ac22-3deec40b9197.csv";
pub const DEFAULT_POPULAR_STATE: &str = "Karnataka";
pub const DEFAULT_POPULAR_LIMIT: usize = 3;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings shared by the browser page and the command-line harness.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Warehouse search endpoint; filters are appended as query pairs.
    pub api_url: Url,
    /// Location asset, a path relative to the page (or the working directory).
    pub csv_path: String,
    pub popular_state: String,
    pub popular_limit: usize,
    pub request_timeout: Duration,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            csv_path: DEFAULT_CSV_PATH.to_string(),
            popular_state: DEFAULT_POPULAR_STATE.to_string(),
            popular_limit: DEFAULT_POPULAR_LIMIT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[allow(clippy::expect_used)]
fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

impl LocatorConfig {
    /// Reads overrides from the environment, after loading any `.env` file.
    #[cfg(feature = "native")]
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("WAREHOUSE_API_URL") {
            config.api_url = Url::parse(&value).map_err(|_| LocatorError::InvalidConfig {
                key: "WAREHOUSE_API_URL",
                value,
            })?;
        }
        if let Some(value) = lookup("LOCATION_CSV") {
            config.csv_path = value;
        }
        if let Some(value) = lookup("POPULAR_STATE") {
            config.popular_state = value;
        }
        if let Some(value) = lookup("POPULAR_LIMIT") {
            config.popular_limit = value.trim().parse().map_err(|_| LocatorError::InvalidConfig {
                key: "POPULAR_LIMIT",
                value,
            })?;
        }
        if let Some(value) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = value.trim().parse().map_err(|_| LocatorError::InvalidConfig {
                key: "REQUEST_TIMEOUT_SECS",
                value,
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_the_hosted_page() -> Result<()> {
        let config = LocatorConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.popular_state, "Karnataka");
        assert_eq!(config.popular_limit, 3);
        assert_eq!(config.csv_path, DEFAULT_CSV_PATH);
        Ok(())
    }

    #[test]
    fn test_overrides_are_applied() -> Result<()> {
        let config = LocatorConfig::from_lookup(lookup(&[
            ("WAREHOUSE_API_URL", "http://localhost:8080/warehouses"),
            ("POPULAR_STATE", "Kerala"),
            ("POPULAR_LIMIT", " 5 "),
            ("REQUEST_TIMEOUT_SECS", "2"),
        ]))?;
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/warehouses");
        assert_eq!(config.popular_state, "Kerala");
        assert_eq!(config.popular_limit, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = LocatorConfig::from_lookup(lookup(&[("POPULAR_LIMIT", "three")]));
        assert!(matches!(
            result,
            Err(LocatorError::InvalidConfig { key: "POPULAR_LIMIT", .. })
        ));

        let result = LocatorConfig::from_lookup(lookup(&[("WAREHOUSE_API_URL", "not a url")]));
        assert!(result.is_err());
    }
}

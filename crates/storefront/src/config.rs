//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SITE_STORAGE_PATH` - JSON file backing the key/value store
//!   (default: `.sample-site/storage.json`)
//! - `SITE_LANDING_PAGE` - Page shown after login and logout (default: `index.html`)
//! - `SITE_SEARCH_PAGE` - Search results page (default: `search_result.html`)
//! - `SITE_LOGIN_REDIRECT_DELAY_MS` - Delay before the post-login redirect
//!   (default: 1500)
//! - `SITE_STRICT_STORAGE` - Report malformed stored data instead of treating
//!   it as absent (default: false)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::store::MalformedPolicy;

const DEFAULT_STORAGE_PATH: &str = ".sample-site/storage.json";
const DEFAULT_LANDING_PAGE: &str = "index.html";
const DEFAULT_SEARCH_PAGE: &str = "search_result.html";
const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// File backing the key/value store
    pub storage_path: PathBuf,
    /// Page to navigate to after login and logout
    pub landing_page: String,
    /// Page that renders search results
    pub search_page: String,
    /// Delay between a successful login and the redirect
    pub login_redirect_delay: Duration,
    /// How malformed stored values are treated
    pub malformed_policy: MalformedPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            landing_page: DEFAULT_LANDING_PAGE.to_string(),
            search_page: DEFAULT_SEARCH_PAGE.to_string(),
            login_redirect_delay: Duration::from_millis(DEFAULT_LOGIN_REDIRECT_DELAY_MS),
            malformed_policy: MalformedPolicy::Lenient,
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_path = get("SITE_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let landing_page =
            get("SITE_LANDING_PAGE").unwrap_or_else(|| DEFAULT_LANDING_PAGE.to_string());
        let search_page =
            get("SITE_SEARCH_PAGE").unwrap_or_else(|| DEFAULT_SEARCH_PAGE.to_string());

        let delay_ms = match get("SITE_LOGIN_REDIRECT_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("SITE_LOGIN_REDIRECT_DELAY_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_LOGIN_REDIRECT_DELAY_MS,
        };

        let strict = match get("SITE_STRICT_STORAGE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "SITE_STRICT_STORAGE".to_string(),
                    format!("expected true or false, got {raw:?}"),
                )
            })?,
            None => false,
        };

        Ok(Self {
            storage_path,
            landing_page,
            search_page,
            login_redirect_delay: Duration::from_millis(delay_ms),
            malformed_policy: if strict {
                MalformedPolicy::Strict
            } else {
                MalformedPolicy::Lenient
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.landing_page, "index.html");
        assert_eq!(config.search_page, "search_result.html");
        assert_eq!(config.login_redirect_delay, Duration::from_millis(1500));
        assert_eq!(config.malformed_policy, MalformedPolicy::Lenient);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SITE_STORAGE_PATH", "/tmp/site.json"),
            ("SITE_LANDING_PAGE", "home.html"),
            ("SITE_LOGIN_REDIRECT_DELAY_MS", "250"),
            ("SITE_STRICT_STORAGE", "TRUE"),
        ])
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/site.json"));
        assert_eq!(config.landing_page, "home.html");
        assert_eq!(config.login_redirect_delay, Duration::from_millis(250));
        assert_eq!(config.malformed_policy, MalformedPolicy::Strict);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("SITE_LANDING_PAGE", "  ")]).unwrap();
        assert_eq!(config.landing_page, "index.html");
    }

    #[test]
    fn test_invalid_delay() {
        let err = load(&[("SITE_LOGIN_REDIRECT_DELAY_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SITE_LOGIN_REDIRECT_DELAY_MS"));
    }

    #[test]
    fn test_invalid_strict_flag() {
        let err = load(&[("SITE_STRICT_STORAGE", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "SITE_STRICT_STORAGE"));
    }
}

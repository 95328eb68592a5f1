// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use crate::store::file::is_valid_key;
use std::env;
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STORAGE_DIR: &str = ".account-storage";
/// Key of the persisted profile record.
pub const DEFAULT_STORAGE_KEY: &str = "user";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the account API (login/register endpoints live under it)
    pub api_base_url: String,
    /// Directory backing the local profile store
    pub storage_dir: PathBuf,
    /// Record key the profile is persisted under
    pub storage_key: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; a `.env` file is read if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("ACCOUNT_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        reqwest::Url::parse(&api_base_url)
            .map_err(|e| ConfigError::Invalid("ACCOUNT_API_BASE_URL", e.to_string()))?;

        let storage_key = env::var("ACCOUNT_STORAGE_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::Invalid(
                "ACCOUNT_STORAGE_KEY",
                format!(
                    "{:?} must be non-empty ASCII letters, digits, '-', '_' or '.', not starting with '.'",
                    storage_key
                ),
            ));
        }

        Ok(Self {
            api_base_url,
            storage_dir: env::var("ACCOUNT_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR)),
            storage_key,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching the environment so parallel tests don't race.
    #[test]
    fn test_config_from_env() {
        env::set_var("ACCOUNT_API_BASE_URL", "http://api.test:8080/");
        env::set_var("ACCOUNT_STORAGE_DIR", "/tmp/account-test");
        env::remove_var("ACCOUNT_STORAGE_KEY");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.api_base_url, "http://api.test:8080");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/account-test"));
        assert_eq!(config.storage_key, "user");

        // Keys the file store would refuse are refused here too.
        for key in ["a/b", "../user", ".hidden"] {
            env::set_var("ACCOUNT_STORAGE_KEY", key);
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::Invalid("ACCOUNT_STORAGE_KEY", _))
            ));
        }
        env::set_var("ACCOUNT_STORAGE_KEY", "profile-v2");
        assert_eq!(Config::from_env().unwrap().storage_key, "profile-v2");
        env::remove_var("ACCOUNT_STORAGE_KEY");

        env::set_var("ACCOUNT_API_BASE_URL", "not a url");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("ACCOUNT_API_BASE_URL", _))
        ));

        env::remove_var("ACCOUNT_API_BASE_URL");
        env::remove_var("ACCOUNT_STORAGE_DIR");
    }
}

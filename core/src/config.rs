//! Runtime configuration for the default-values fetch.

use std::env;

pub const DEFAULTS_URL_VAR: &str = "PROFILE_FORM_DEFAULTS_URL";
pub const DEFAULTS_USER_VAR: &str = "PROFILE_FORM_DEFAULTS_USER";

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_USER_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub defaults_base_url: String,
    pub defaults_user_id: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            defaults_base_url: DEFAULT_BASE_URL.to_string(),
            defaults_user_id: DEFAULT_USER_ID,
        }
    }
}

impl FormConfig {
    /// Read overrides from the environment; unset or unparseable values
    /// keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(DEFAULTS_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.defaults_base_url = url;
        }
        if let Some(raw) = lookup(DEFAULTS_USER_VAR) {
            match raw.trim().parse() {
                Ok(id) => config.defaults_user_id = id,
                Err(_) => tracing::warn!(value = %raw, "ignoring unparseable {DEFAULTS_USER_VAR}"),
            }
        }
        config
    }
}

// Runtime configuration, read from the environment (and `.env` if present)
use crate::query_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use std::env;
use thiserror::Error;

pub const API_URL_VAR: &str = "HOLIDAYS_API_URL";
pub const TIMEOUT_VAR: &str = "HOLIDAYS_API_TIMEOUT_MS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of milliseconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    // Same as `from_env` but against an arbitrary source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup(API_URL_VAR) {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyValue(API_URL_VAR)),
            Some(url) => url.trim().to_string(),
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout_ms = match lookup(TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: TIMEOUT_VAR,
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Config {
            api_url,
            timeout_ms,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout_ms: self.timeout_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.client_config().base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_values_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            (API_URL_VAR, " https://holidays.example.com "),
            (TIMEOUT_VAR, "2500"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://holidays.example.com");
        assert_eq!(config.client_config().timeout_ms, 2500);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "soon")])),
            Err(ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: "soon".to_string()
            })
        );
        assert!(Config::from_lookup(lookup_from(&[(TIMEOUT_VAR, "0")])).is_err());
        assert_eq!(
            Config::from_lookup(lookup_from(&[(API_URL_VAR, "")])),
            Err(ConfigError::EmptyValue(API_URL_VAR))
        );
    }
}

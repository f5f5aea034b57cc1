use dotenvy::dotenv;
use std::env;
use thiserror::Error;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub load_sample_data: bool,
    pub log_level: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} missing, it is required")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16 number",
                value: raw,
            })?,
            None => 8000,
        };

        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("API_KEY"))?;

        let load_sample_data = match lookup("LOAD_SAMPLE_DATA") {
            Some(raw) => parse_bool("LOAD_SAMPLE_DATA", raw)?,
            None => true,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            api_key,
            load_sample_data,
            log_level,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(name: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "a boolean",
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("API_KEY", "test-api-key")]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8000");
        assert_eq!(config.api_key, "test-api-key");
        assert!(config.load_sample_data);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("API_KEY", "k"),
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("LOAD_SAMPLE_DATA", "false"),
            ("LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert!(!config.load_sample_data);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_api_key_required() {
        assert_eq!(config(&[]).err(), Some(ConfigError::Missing("API_KEY")));
        assert_eq!(config(&[("API_KEY", "  ")]).err(), Some(ConfigError::Missing("API_KEY")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("API_KEY", "k"), ("PORT", "99999")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("API_KEY", "k"), ("LOAD_SAMPLE_DATA", "maybe")]),
            Err(ConfigError::Invalid { name: "LOAD_SAMPLE_DATA", .. })
        ));
    }
}

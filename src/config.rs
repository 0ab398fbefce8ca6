use std::time::Duration;

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize};

use crate::chain::Chain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Alchemy,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn init() -> Result<Self> {
        Ok(envy::from_env()?)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }
}

/// Settings of the terminal view, read from `INSIGHTS_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_endpoint")]
    pub url: String,
    #[serde(default)]
    pub chain: Chain,
}

impl ViewConfig {
    pub fn init() -> Result<Self> {
        prefixed_config("INSIGHTS")
    }
}

fn prefixed_config<T: DeserializeOwned>(prefix: &str) -> Result<T> {
    Ok(envy::prefixed(format!("{prefix}_")).from_env()?)
}

fn default_port() -> u16 {
    3000
}

fn default_backend() -> BackendKind {
    BackendKind::Alchemy
}

fn default_provider_timeout() -> u64 {
    30
}

fn default_endpoint() -> String {
    "http://localhost:3000/api/blockInsights".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, BackendKind::Alchemy);
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_from_vars() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("BACKEND".to_string(), "mock".to_string()),
            ("PROVIDER_TIMEOUT_SECS".to_string(), "5".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend, BackendKind::Mock);
        assert_eq!(config.provider_timeout_secs, 5);
    }

    #[test]
    fn test_view_config() {
        let vars = vec![("INSIGHTS_CHAIN".to_string(), "ARB_MAINNET".to_string())];
        let config: ViewConfig = envy::prefixed("INSIGHTS_").from_iter(vars).unwrap();
        assert_eq!(config.chain, Chain::ArbMainnet);
        assert_eq!(config.url, default_endpoint());
    }
}

//! Configuration types for Waypoint

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_PORT, DEFAULT_MAX_EXPANSIONS, DEFAULT_REFRESH_INTERVAL_SECS};
use crate::{Error, GraphSpec, Result};

/// Search bounds applied to every routing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth bound override. When unset, the graph's vertex count is used.
    #[serde(default)]
    pub max_hops: Option<usize>,

    /// Maximum route extensions per search before it is aborted
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

fn default_max_expansions() -> usize {
    DEFAULT_MAX_EXPANSIONS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: None,
            max_expansions: default_max_expansions(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API server bind address
    #[serde(default = "default_api_host")]
    pub api_host: IpAddr,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Seconds between edge cost refreshes (0 disables the refresh loop)
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Routing search bounds
    #[serde(default)]
    pub search: SearchConfig,

    /// Graph loaded at startup
    #[serde(default)]
    pub seed_graph: Option<GraphSpec>,
}

fn default_api_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_port: default_api_port(),
            refresh_interval_secs: default_refresh_interval_secs(),
            search: SearchConfig::default(),
            seed_graph: None,
        }
    }
}

impl AppConfig {
    /// Socket address the API server binds to
    pub fn api_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.api_port)
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        if self.search.max_expansions == 0 {
            return Err(Error::Config(
                "search.max_expansions must be greater than zero".to_string(),
            ));
        }
        if self.search.max_hops == Some(0) {
            return Err(Error::Config(
                "search.max_hops must be greater than zero when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_port, 19080);
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.search.max_hops, None);
        assert_eq!(config.search.max_expansions, DEFAULT_MAX_EXPANSIONS);
        assert!(config.seed_graph.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = AppConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.api_port, config.api_port);
        assert_eq!(parsed.search, config.search);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = AppConfig::from_json_str(
            r#"{"api_port": 8080, "search": {"max_hops": 4},
                "seed_graph": {"vertices": ["a"], "edges": []}}"#,
        )
        .unwrap();
        assert_eq!(parsed.api_port, 8080);
        assert_eq!(parsed.refresh_interval_secs, 30);
        assert_eq!(parsed.search.max_hops, Some(4));
        assert_eq!(parsed.search.max_expansions, DEFAULT_MAX_EXPANSIONS);
        assert_eq!(parsed.seed_graph.unwrap().vertices, vec!["a".to_string()]);
    }

    #[test]
    fn test_api_addr() {
        assert_eq!(AppConfig::default().api_addr().to_string(), "127.0.0.1:19080");

        let parsed = AppConfig::from_json_str(r#"{"api_host": "0.0.0.0", "api_port": 8080}"#).unwrap();
        assert_eq!(parsed.api_addr().to_string(), "0.0.0.0:8080");

        let err = AppConfig::from_json_str(r#"{"api_host": "localhost"}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = AppConfig::from_json_str(r#"{"search": {"max_expansions": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = AppConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::load_from_path("/nonexistent/waypoint.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

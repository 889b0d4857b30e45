use serde::{Deserialize, Serialize};

use super::discovery::DiscoveryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration for the discovery engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Socket configuration (multicast group, port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Probe/browse timing configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. semcache-mdns.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("semcache-mdns.toml").exists() {
            Self::from_file("semcache-mdns.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port cannot be 0".to_string()));
        }
        if !self.server.multicast_group.is_multicast() {
            return Err(ConfigError::Validation(format!(
                "{} is not a multicast group",
                self.server.multicast_group
            )));
        }
        if self.discovery.probe_rounds == 0 {
            return Err(ConfigError::Validation(
                "probe_rounds cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::server::DEFAULT_MDNS_PORT;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, DEFAULT_MDNS_PORT);
        assert_eq!(config.discovery.probe_rounds, 3);
    }

    #[test]
    fn toml_fragment_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 5353

            [discovery]
            browse_window_ms = 2000
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 5353);
        assert_eq!(config.discovery.browse_window_ms, 2000);
        assert_eq!(config.discovery.probe_timeout_ms, 250);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = Config::default();
        config.apply_cli_overrides(CliOverrides {
            port: Some(5354),
            bind_address: None,
            log_level: Some("debug".to_string()),
        });
        assert_eq!(config.server.port, 5354);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn non_multicast_group_is_rejected() {
        let mut config = Config::default();
        config.server.multicast_group = "10.0.0.1".parse().unwrap();
        assert!(config.validate().is_err());
    }
}

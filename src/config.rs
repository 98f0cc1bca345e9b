//! Configuration module
//!
//! Settings are read from a TOML file (`~/.config/booking-service/config.toml`
//! by default, overridable via the `RENTORA_CONFIG` environment variable).
//! Every section is optional; missing values fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub housekeeping: HousekeepingConfig,
}

/// REST API server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by `RUST_LOG` when set
    pub level: String,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Register a handful of demo resources on startup
    pub seed_demo_data: bool,
}

/// Background housekeeping configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HousekeepingConfig {
    /// Seconds between sweeps that decline stale pending reservations
    pub sweep_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}

impl Default for HousekeepingConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Bind address for the REST API server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Default config file location: `~/.config/booking-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("booking-service")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.store.seed_demo_data);
        assert_eq!(cfg.housekeeping.sweep_interval_secs, 60);
        assert_eq!(cfg.address(), "0.0.0.0:8080");
    }

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [logging]
            level = "debug"

            [store]
            seed_demo_data = false

            [housekeeping]
            sweep_interval_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(cfg.address(), "127.0.0.1:9090");
        assert_eq!(cfg.logging.level, "debug");
        assert!(!cfg.store.seed_demo_data);
        assert_eq!(cfg.housekeeping.sweep_interval_secs, 15);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 3000
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.store.seed_demo_data);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/booking-config.toml"))
            .expect_err("missing file must not parse");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

// Configuration module entry point
// Loads and validates the startup configuration

mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use types::{Config, LoggingConfig, PerformanceConfig, ScanConfig, ServerConfig};

/// Default config file name (without extension)
const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the default location ("config.toml" in the
    /// working directory), with `MVC_*` environment variable overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("MVC"))
            .set_default("scan.package", "")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    /// Reject configurations the framework cannot start from.
    ///
    /// The scan root is the one mandatory value: without it there is
    /// nothing to build the application context from.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.scan.package.trim().is_empty() {
            return Err(StartupError::EmptyScanPackage);
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| StartupError::InvalidAddress { addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_no_file_exists() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
    }

    #[test]
    fn empty_scan_package_fails_validation() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert!(cfg.scan.package.is_empty());
        assert!(matches!(
            cfg.validate(),
            Err(StartupError::EmptyScanPackage)
        ));
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.socket_addr(),
            Err(StartupError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn socket_addr_parses_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}

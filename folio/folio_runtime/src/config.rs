//! Configuration for the Folio runtime
//!
//! Handles loading and managing runtime configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_core::LogLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur in configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written by the front end's subscriber
    #[serde(default)]
    pub level: LogLevel,
}

/// Decision audit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether evaluations are recorded
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Evaluations kept per viewer before the oldest are dropped
    #[serde(default = "default_max_entries_per_viewer")]
    pub max_entries_per_viewer: usize,
}

fn default_audit_enabled() -> bool {
    true
}

fn default_max_entries_per_viewer() -> usize {
    1000
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            max_entries_per_viewer: default_max_entries_per_viewer(),
        }
    }
}

/// The premium upgrade offer shown to standard users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipConfig {
    /// Price in the smallest currency unit
    #[serde(default = "default_price_cents")]
    pub price_cents: u64,

    /// ISO currency code, lowercase
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_price_cents() -> u64 {
    1500
}

fn default_currency() -> String {
    "usd".to_string()
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            price_cents: default_price_cents(),
            currency: default_currency(),
        }
    }
}

/// How rejected requests are reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Report a denied view of a private document as not found
    #[serde(default)]
    pub conceal_forbidden: bool,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Decision audit configuration
    #[serde(default)]
    pub audit: AuditConfig,

    /// Membership offer
    #[serde(default)]
    pub membership: MembershipConfig,

    /// Response policy
    #[serde(default)]
    pub access: AccessConfig,
}

impl RuntimeConfig {
    /// Load configuration from a file
    pub fn load(path: Option<&str>) -> Result<Self> {
        // Start with default configuration
        let mut config = RuntimeConfig::default();

        if let Some(path) = path {
            info!("Loading configuration from {}", path);

            if !Path::new(path).exists() {
                warn!("Configuration file not found: {}", path);
                return Ok(config);
            }

            let content = fs::read_to_string(path)
                .context(format!("Failed to read configuration file: {}", path))?;

            config = Self::parse(&content)
                .context(format!("Failed to parse configuration file: {}", path))?;
        } else {
            info!("No configuration file specified, using defaults");
        }

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audit.max_entries_per_viewer == 0 {
            return Err(ConfigError::Invalid(
                "Audit max_entries_per_viewer cannot be zero".to_string(),
            )
            .into());
        }

        if self.membership.currency.trim().is_empty() {
            return Err(
                ConfigError::Invalid("Membership currency cannot be empty".to_string()).into(),
            );
        }

        if self.membership.price_cents == 0 {
            warn!("Membership price is zero; upgrades will be offered for free");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let config_toml = r#"
            [logging]
            level = "debug"

            [audit]
            max_entries_per_viewer = 10

            [membership]
            price_cents = 2500
            currency = "eur"

            [access]
            conceal_forbidden = true
        "#;

        fs::write(path, config_toml).unwrap();

        let config = RuntimeConfig::load(Some(path)).unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.audit.enabled);
        assert_eq!(config.audit.max_entries_per_viewer, 10);
        assert_eq!(config.membership.price_cents, 2500);
        assert_eq!(config.membership.currency, "eur");
        assert!(config.access.conceal_forbidden);
    }

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::load(None).unwrap();

        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.audit.enabled);
        assert_eq!(config.audit.max_entries_per_viewer, 1000);
        assert_eq!(config.membership.price_cents, 1500);
        assert_eq!(config.membership.currency, "usd");
        assert!(!config.access.conceal_forbidden);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = RuntimeConfig::load(path.to_str()).unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        fs::write(path, "[audit]\nmax_entries_per_viewer = 0\n").unwrap();

        let err = RuntimeConfig::load(Some(path)).unwrap_err();
        assert!(err.to_string().contains("max_entries_per_viewer"));

        fs::write(path, "[membership]\ncurrency = \"  \"\n").unwrap();
        assert!(RuntimeConfig::load(Some(path)).is_err());

        fs::write(path, "[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(RuntimeConfig::load(Some(path)).is_err());
    }
}

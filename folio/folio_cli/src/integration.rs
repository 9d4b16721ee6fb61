//! Integration with the Folio runtime
//!
//! Builds the runtime a command runs against and installs the log
//! subscriber.

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::LogLevel;
use folio_runtime::{Runtime, RuntimeConfig};
use tracing_subscriber::EnvFilter;

use crate::fixture::{Fixture, World};

/// Filter for a configured log level.
pub fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_str())
}

/// Start logging, then load the configuration and apply its log level.
///
/// The stderr subscriber goes in first, at the command-line level or the
/// default, so warnings raised while reading the configuration are
/// printed. A level from the file replaces it afterwards unless the
/// command line named one. Stdout is reserved for command output.
pub fn load_config(path: Option<&str>, log_level: Option<LogLevel>) -> Result<RuntimeConfig> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(level_filter(log_level.unwrap_or_default()))
        .with_filter_reloading();
    let handle = subscriber.reload_handle();
    // Fails when a subscriber is already set; the handle is then dangling.
    let installed = subscriber.try_init().is_ok();

    let mut config = RuntimeConfig::load(path).context("Failed to load configuration")?;
    match log_level {
        Some(level) => config.logging.level = level,
        None if installed => handle
            .reload(level_filter(config.logging.level))
            .context("Failed to apply the configured log level")?,
        None => {}
    }
    Ok(config)
}

/// Create a runtime and seed it from a fixture file.
pub fn initialize_world(config: RuntimeConfig, fixture: &Path) -> Result<World> {
    let world = Fixture::load(fixture)
        .and_then(|fixture| fixture.seed(Runtime::new(config)))
        .with_context(|| format!("Failed to load fixture {}", fixture.display()))?;
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_level_filter() {
        assert_eq!(
            level_filter(LogLevel::Warning).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            level_filter(LogLevel::Trace).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_command_line_level_wins() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[logging]\nlevel = \"debug\"\n").unwrap();
        let path = file.path().to_str().unwrap();

        let config = load_config(Some(path), Some(LogLevel::Error)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Error);

        let config = load_config(Some(path), None).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_initialize_world() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[[users]]\nname = \"a\"\n\n[[documents]]\ntitle = \"T\"\nbody = \"B\"\nowner = \"a\"\n",
        )
        .unwrap();

        let world = initialize_world(RuntimeConfig::default(), file.path()).unwrap();
        assert!(world.document_id("T").is_some());
    }

    #[test]
    fn test_missing_fixture_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = initialize_world(RuntimeConfig::default(), &dir.path().join("none.toml"));
        assert!(result.is_err());
    }
}

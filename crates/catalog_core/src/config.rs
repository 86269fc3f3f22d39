//! Layered runtime configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults,
//! 2. an optional file named by `CATALOG_CONFIG_PATH` (any format the
//!    `config` crate recognizes by extension),
//! 3. `CATALOG__<SECTION>__<KEY>` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG_PATH";
const ENV_PREFIX: &str = "CATALOG";

const LOGGING_LEVEL_KEY: &str = "logging.level";

/// Top-level catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path. `None` opens an in-memory catalog.
    pub path: Option<PathBuf>,
}

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

impl CatalogConfig {
    /// Loads configuration from defaults, the optional file and environment.
    ///
    /// # Errors
    /// Returns an error when the named file cannot be parsed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let file = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from(file, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    /// Loads configuration from an explicit file and environment source.
    pub fn load_from(file: Option<PathBuf>, environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default(LOGGING_LEVEL_KEY, crate::logging::default_log_level())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogConfig;
    use config::Environment;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn empty_environment() -> Environment {
        Environment::with_prefix("CATALOG")
            .separator("__")
            .source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_use_memory_database_and_build_level() {
        let config = CatalogConfig::load_from(None, empty_environment()).unwrap();
        assert_eq!(config.database.path, None);
        assert_eq!(config.logging.level, crate::logging::default_log_level());
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn file_values_are_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\npath = \"/var/lib/catalog.db\"\n\n[logging]\nlevel = \"warn\""
        )
        .unwrap();

        let config =
            CatalogConfig::load_from(Some(file.path().to_path_buf()), empty_environment())
                .unwrap();
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/catalog.db"))
        );
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn environment_overrides_defaults() {
        let environment = Environment::with_prefix("CATALOG")
            .separator("__")
            .source(Some(HashMap::from([
                ("CATALOG__LOGGING__LEVEL".to_string(), "error".to_string()),
                ("CATALOG__LOGGING__DIR".to_string(), "/tmp/catalog-logs".to_string()),
            ])));

        let config = CatalogConfig::load_from(None, environment).unwrap();
        assert_eq!(config.logging.level, "error");
        assert_eq!(config.logging.dir.as_deref(), Some("/tmp/catalog-logs"));
    }

    #[test]
    fn missing_named_file_is_an_error() {
        let result = CatalogConfig::load_from(
            Some(PathBuf::from("/nonexistent/catalog.toml")),
            empty_environment(),
        );
        assert!(result.is_err());
    }
}

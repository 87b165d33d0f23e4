//! Configuration for ShopDB MCP Server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// ShopDB MCP configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopDbConfig {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Result shaping settings
    #[serde(default)]
    pub query: QueryConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Open every connection with SQLITE_OPEN_READ_ONLY.
    /// Default: true
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// How long a statement waits on a locked database, in seconds
    /// Default: 30
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

/// Result shaping configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Rows returned before the payload is truncated
    /// Default: 100
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_path() -> PathBuf {
    PathBuf::from("shop.db")
}

fn default_read_only() -> bool {
    true
}

fn default_busy_timeout() -> u64 {
    30
}

fn default_max_rows() -> usize {
    100
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            read_only: default_read_only(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
        }
    }
}

impl ShopDbConfig {
    /// Load configuration from file
    ///
    /// Looks for config in:
    /// 1. `SHOPDB_CONFIG_PATH` environment variable
    /// 2. `~/.binks/shopdb.toml`
    ///
    /// `SHOPDB_PATH`, when set, overrides `database.path`.
    pub fn load() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("SHOPDB_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".binks")
                .join("shopdb.toml")
        };

        let mut config = Self::from_file(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no usable file exists
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {:#}. Using default.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Create a default config pointing to a specific database
    pub fn with_database(path: PathBuf) -> Self {
        Self {
            database: DatabaseConfig {
                path,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SHOPDB_PATH") {
            self.database.path = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShopDbConfig::default();
        assert_eq!(config.database.path, PathBuf::from("shop.db"));
        assert!(config.database.read_only);
        assert_eq!(config.database.busy_timeout_secs, 30);
        assert_eq!(config.query.max_rows, 100);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ShopDbConfig::from_toml(
            r#"
            [database]
            path = "/var/lib/shop/shop.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/var/lib/shop/shop.db"));
        assert!(config.database.read_only);
        assert_eq!(config.query.max_rows, 100);
    }

    #[test]
    fn test_full_toml() {
        let config = ShopDbConfig::from_toml(
            r#"
            [database]
            path = "data.db"
            read_only = false
            busy_timeout_secs = 5

            [query]
            max_rows = 25
            "#,
        )
        .unwrap();

        assert!(!config.database.read_only);
        assert_eq!(config.database.busy_timeout_secs, 5);
        assert_eq!(config.query.max_rows, 25);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShopDbConfig::from_file(&dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdb.toml");
        std::fs::write(&path, "[query]\nmax_rows = 7\n").unwrap();

        let config = ShopDbConfig::from_file(&path).unwrap();
        assert_eq!(config.query.max_rows, 7);
        assert_eq!(config.database.path, PathBuf::from("shop.db"));
    }
}

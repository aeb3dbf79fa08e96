//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// Cutstock configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default author for new records
    pub author: Option<String>,

    /// Catalog directory (parts.yaml, materials.yaml, prices.yaml)
    pub catalog_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/cutstock/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(author) = std::env::var("CUTSTOCK_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(dir) = std::env::var("CUTSTOCK_CATALOG_DIR") {
            config.catalog_dir = Some(PathBuf::from(dir));
        }
        if let Ok(format) = std::env::var("CUTSTOCK_FORMAT") {
            config.default_format = Some(format);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cutstock")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.catalog_dir.is_some() {
            self.catalog_dir = other.catalog_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// The author to attribute new records to
    pub fn author_or_default(&self) -> String {
        self.author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_precedence() {
        let mut base = Config {
            author: Some("base".to_string()),
            catalog_dir: Some(PathBuf::from("/base")),
            default_format: None,
        };
        base.merge(Config {
            author: Some("override".to_string()),
            catalog_dir: None,
            default_format: Some("json".to_string()),
        });

        assert_eq!(base.author.as_deref(), Some("override"));
        assert_eq!(base.catalog_dir, Some(PathBuf::from("/base")));
        assert_eq!(base.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_config_parses_partial_yaml() {
        let config: Config = serde_yml::from_str("author: jana\n").unwrap();
        assert_eq!(config.author.as_deref(), Some("jana"));
        assert!(config.catalog_dir.is_none());
    }
}

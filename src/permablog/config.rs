use crate::error::{BlogError, Result};
use crate::render::{RenderOptions, DEFAULT_INDENT};
use crate::store::fs::DEFAULT_COLLECTION_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MAX_DEPTH: usize = 64;
/// Thread resolution recurses once per level, so the depth bound is capped.
pub const MAX_DEPTH_LIMIT: usize = 1024;

pub const KEYS: &[&str] = &["max-depth", "indent", "collection"];

/// Configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BlogConfig {
    /// Deepest comment level resolved before a thread is cut off
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Spaces per nesting level in reports
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// File name of the record collection inside the data directory
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn default_collection() -> String {
    DEFAULT_COLLECTION_FILE.to_string()
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            indent: DEFAULT_INDENT,
            collection: default_collection(),
        }
    }
}

impl BlogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: BlogConfig = serde_json::from_str(&content)?;
        if config.max_depth > MAX_DEPTH_LIMIT {
            tracing::warn!(
                max_depth = config.max_depth,
                limit = MAX_DEPTH_LIMIT,
                "max_depth in config.json is above the limit, using the limit"
            );
            config.max_depth = MAX_DEPTH_LIMIT;
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.indent,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "max-depth" => Some(self.max_depth.to_string()),
            "indent" => Some(self.indent.to_string()),
            "collection" => Some(self.collection.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "max-depth" => {
                let depth = parse_count(key, value)?;
                if depth > MAX_DEPTH_LIMIT {
                    return Err(BlogError::Invalid(format!(
                        "max-depth must be at most {}, got {}",
                        MAX_DEPTH_LIMIT, depth
                    )));
                }
                self.max_depth = depth;
            }
            "indent" => self.indent = parse_count(key, value)?,
            "collection" => {
                let name = value.trim();
                if name.is_empty() || name.contains(['/', '\\']) {
                    return Err(BlogError::Invalid(format!(
                        "collection must be a plain file name, got {:?}",
                        value
                    )));
                }
                self.collection = name.to_string();
            }
            _ => return Err(BlogError::Invalid(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| BlogError::Invalid(format!("{} must be a whole number, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = BlogConfig::default();
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.indent, 4);
        assert_eq!(config.collection, "records.json");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempdir().unwrap();
        let config = BlogConfig::load(dir.path()).unwrap();
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = BlogConfig::default();
        config.set("max-depth", "3").unwrap();
        config.set("indent", " 2 ").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = BlogConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.max_depth, 3);
        assert_eq!(loaded.render_options().indent, 2);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"indent": 8}"#).unwrap();
        let loaded = BlogConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.indent, 8);
        assert_eq!(loaded.max_depth, 64);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = BlogConfig::default();
        assert!(config.set("max-depth", "lots").is_err());
        assert!(config.set("collection", "../escape.json").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn test_max_depth_is_capped() {
        let mut config = BlogConfig::default();
        assert!(config.set("max-depth", "1024").is_ok());
        assert_eq!(config.max_depth, MAX_DEPTH_LIMIT);
        assert!(config.set("max-depth", "1025").is_err());
        assert!(config.set("max-depth", "18446744073709551615").is_err());
        assert_eq!(config.max_depth, MAX_DEPTH_LIMIT);

        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"max_depth": 9999999}"#,
        )
        .unwrap();
        let loaded = BlogConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.max_depth, MAX_DEPTH_LIMIT);
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft project configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding saved page documents (*.json)
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Where rendered HTML is written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub pretty: bool,

    /// When set, pages are wrapped in a full HTML document with this title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            out_dir: default_out_dir(),
            pretty: false,
            page_title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pagesDir": "site/pages",
            "outDir": "public",
            "pretty": true,
            "pageTitle": "My Store"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.pages_dir, "site/pages");
        assert_eq!(config.out_dir, "public");
        assert!(config.pretty);
        assert_eq!(config.page_title.as_deref(), Some("My Store"));
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pages_dir, "pages");
        assert_eq!(config.out_dir, "dist");
        assert!(!config.pretty);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        assert_eq!(Config::load(&cwd).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{"outDir": "build"}"#,
        )
        .unwrap();

        let cwd = dir.path().display().to_string();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.out_dir, "build");
        assert_eq!(config.get_out_dir(&cwd), dir.path().join("build"));
        assert_eq!(config.get_pages_dir(&cwd), dir.path().join("pages"));
    }
}

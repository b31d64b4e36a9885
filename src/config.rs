use crate::theme::ThemeMode;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 350;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Gateway API base URL
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Prefills the API key field of the send forms
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Where exported logs are written; the user's download dir when unset
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            export_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Application directory under ~/.config
    pub fn app_dir() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("gateway-console");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Directory exported log files are written to
    pub fn export_dir(&self) -> PathBuf {
        self.ui
            .export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Page size clamped to something the table can show
    pub fn page_size(&self) -> usize {
        self.ui.page_size.clamp(1, 500)
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    if url::Url::parse(url).is_err() {
        return Err("Invalid URL format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ui.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.ui.search_debounce_ms, DEFAULT_SEARCH_DEBOUNCE_MS);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nbase_url = \"http://localhost:8080\"\n\n[ui]\ntheme = \"light\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.ui.theme, ThemeMode::Light);
        assert_eq!(config.ui.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.gateway.api_key, None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.server.base_url = Some("https://gw.example.com".to_string());
        config.gateway.api_key = Some("key-123".to_string());
        config.ui.theme = ThemeMode::Dark;
        config.ui.page_size = 25;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_export_dir_override() {
        let mut config = Config::default();
        config.ui.export_dir = Some(PathBuf::from("/tmp/exports"));
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_page_size_clamped() {
        let mut config = Config::default();
        config.ui.page_size = 0;
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:8080").is_ok());
        assert!(validate_url("https://gw.example.com/api").is_ok());
        assert_eq!(validate_url("").unwrap_err(), "URL cannot be empty");
        assert!(validate_url("ftp://host").is_err());
        assert!(validate_url("localhost:8080").is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LumenError, LumenResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub sources: SourcesConfig,
    pub network: NetworkConfig,
    /// Alias keyword -> ordered list of URLs / shell commands
    pub aliases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: u32,
    pub enable_apps: bool,
    pub enable_files: bool,
    pub enable_bookmarks: bool,
    pub enable_web_search: bool,
    pub enable_sys_commands: bool,
    pub enable_calculator: bool,
    pub enable_clipboard: bool,
    pub enable_shell_commands: bool,
    pub enable_weather: bool,
    pub enable_converter: bool,
    pub bookmark_min_query_len: usize,
    pub file_min_query_len: usize,
    pub web_search_prefixes: Vec<String>,
    pub web_search_url: String,
    pub clipboard_keyword: String,
    pub weather_keywords: Vec<String>,
}

/// Overrides for the directories and files each source reads.
/// `None` means "use the platform default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub app_dirs: Option<Vec<String>>,
    pub bookmark_files: Option<Vec<String>>,
    pub file_dirs: Option<Vec<String>>,
    pub icon_dirs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub exchange_rate_url: String,
    pub weather_url: String,
    pub weather_timeout_ms: u64,
    pub rate_timeout_ms: u64,
    pub rate_max_age_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 8,
            enable_apps: true,
            enable_files: true,
            enable_bookmarks: true,
            enable_web_search: true,
            enable_sys_commands: true,
            enable_calculator: true,
            enable_clipboard: true,
            enable_shell_commands: true,
            enable_weather: true,
            enable_converter: true,
            bookmark_min_query_len: 2,
            file_min_query_len: 3,
            web_search_prefixes: vec!["g ".to_string(), "? ".to_string()],
            web_search_url: "https://www.google.com/search?q={query}".to_string(),
            clipboard_keyword: "clip".to_string(),
            weather_keywords: vec!["weather".to_string(), "időjárás".to_string()],
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            exchange_rate_url: "https://open.er-api.com/v6/latest/USD".to_string(),
            weather_url: "https://wttr.in".to_string(),
            weather_timeout_ms: 3000,
            rate_timeout_ms: 3000,
            rate_max_age_secs: 3600,
        }
    }
}

impl SearchConfig {
    /// Resolve a web search term into the configured search URL
    pub fn web_search_url_for(&self, term: &str) -> String {
        self.web_search_url.replace("{query}", &urlencoding::encode(term))
    }
}

impl SourcesConfig {
    pub fn app_dirs(&self) -> Vec<PathBuf> {
        resolve_paths(&self.app_dirs, || {
            let mut paths = vec![PathBuf::from("/usr/share/applications")];
            if let Some(home) = dirs::home_dir() {
                paths.push(home.join(".local/share/applications"));
            }
            paths
        })
    }

    pub fn bookmark_files(&self) -> Vec<PathBuf> {
        resolve_paths(&self.bookmark_files, || {
            let Some(home) = dirs::home_dir() else {
                return Vec::new();
            };
            let config = home.join(".config");
            vec![
                config.join("google-chrome/Default/Bookmarks"),
                config.join("BraveSoftware/Brave-Browser/Default/Bookmarks"),
                config.join("chromium/Default/Bookmarks"),
            ]
        })
    }

    pub fn file_dirs(&self) -> Vec<PathBuf> {
        resolve_paths(&self.file_dirs, || {
            let Some(home) = dirs::home_dir() else {
                return Vec::new();
            };
            vec![
                home.join("Desktop"),
                home.join("Documents"),
                home.join("Downloads"),
            ]
        })
    }

    pub fn icon_dirs(&self) -> Vec<PathBuf> {
        resolve_paths(&self.icon_dirs, || {
            vec![
                PathBuf::from("/usr/share/pixmaps"),
                PathBuf::from("/usr/share/icons/hicolor/48x48/apps"),
                PathBuf::from("/usr/share/icons/hicolor/scalable/apps"),
            ]
        })
    }
}

fn resolve_paths(
    overrides: &Option<Vec<String>>,
    defaults: impl FnOnce() -> Vec<PathBuf>,
) -> Vec<PathBuf> {
    match overrides {
        Some(paths) => paths
            .iter()
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
            .collect(),
        None => defaults(),
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("lumen")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if it is
    /// missing or unreadable
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load config: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate config from a specific file
    pub fn load_from(path: &Path) -> LumenResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.validate();
        Ok(config)
    }

    /// Validate and normalize config values
    pub fn validate(&mut self) {
        // Clamp max_results to reasonable range (1 - 20)
        self.search.max_results = self.search.max_results.clamp(1, 20);

        // Alias lookup is case-insensitive; store keys lowercased
        let aliases = std::mem::take(&mut self.aliases);
        self.aliases = aliases
            .into_iter()
            .map(|(key, commands)| (key.to_lowercase(), commands))
            .collect();
    }

    /// Save config to the default location
    pub fn save(&self) -> LumenResult<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LumenError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)?;
        Ok(())
    }
}

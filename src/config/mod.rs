//! Configuration management for quire.
//!
//! Configuration is read from `~/.config/quire/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
    pub search: SearchConfig,
}

/// Where the mini-app backend lives and how requests are signed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Header carrying the host-issued session token
    pub session_header: String,
    pub session_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            session_header: "X-Telegram-Data".to_string(),
            session_token: None,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Go through the mini-app backend's JSON API
    #[default]
    Backend,
    /// Read an OPDS catalog directly
    Opds,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub mode: CatalogMode,
    /// Root catalog for direct mode
    pub root_url: Option<String>,
    /// OpenSearch template with a `{searchTerms}` placeholder
    pub search_template: Option<String>,
    /// Where direct-mode downloads are saved (default: the user's download dir)
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// User id passed to the backend for entitlement checks
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl CatalogConfig {
    pub fn effective_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/quire/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quire").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# quire configuration

[backend]
# Mini-app backend serving /feed, /search, /config and /download
base_url = "http://localhost:8000/api"

# Header that carries the host-issued session token
session_header = "X-Telegram-Data"

# Signed session token, forwarded verbatim on every request
# session_token = ""

# Request timeout in seconds
timeout_secs = 20

[catalog]
# "backend" goes through the API above, "opds" reads a catalog directly
mode = "backend"

# Direct mode only
# root_url = "https://catalog.example.com/opds"
# search_template = "https://catalog.example.com/opds/search?q={searchTerms}"
# download_dir = "/home/me/Books"

[session]
# uid = "123456"

[search]
# Quiet period before a typed query is sent
debounce_ms = 500
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
        assert_eq!(config.backend.session_header, "X-Telegram-Data");
        assert_eq!(config.catalog.mode, CatalogMode::Backend);
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[catalog]
mode = "opds"
root_url = "https://cat.example.com/opds"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.catalog.mode, CatalogMode::Opds);
        assert_eq!(
            config.catalog.root_url.as_deref(),
            Some("https://cat.example.com/opds")
        );
        assert_eq!(config.backend.timeout_secs, 20);
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.catalog.mode, CatalogMode::Backend);
        assert!(config.session.uid.is_none());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.backend.timeout_secs, 20);

        // Second load parses the file that was just written
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.search.debounce_ms, 500);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\ndebounce_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_download_dir_override() {
        let catalog = CatalogConfig {
            download_dir: Some(PathBuf::from("/srv/books")),
            ..CatalogConfig::default()
        };
        assert_eq!(catalog.effective_download_dir(), PathBuf::from("/srv/books"));
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, TarjomanError};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "tarjoman.toml";

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_history_path() -> PathBuf {
    PathBuf::from(".tarjoman/history.json")
}

fn default_max_entries() -> usize {
    200
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Use the remote translator; when false only the dictionary is consulted
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// LibreTranslate base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional LibreTranslate API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Seconds to wait for the server before falling back to the dictionary
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// TOML file with extra phrases (`en_fa` and `fa_en` arrays of pairs)
    #[serde(default)]
    pub extra_phrases: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    /// Oldest entries are dropped beyond this size
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Read translations back after each submission
    #[serde(default = "default_true")]
    pub playback: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self { playback: true }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TarjomanError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TarjomanError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TarjomanError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TarjomanError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Explicit path, else `tarjoman.toml` in the working directory, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.remote.enabled);
        assert_eq!(config.remote.endpoint, "http://localhost:5000");
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.history.max_entries, 200);
        assert!(config.speech.playback);
        assert!(config.dictionary.extra_phrases.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("tarjoman.toml");
        file.write_str("[remote]\nendpoint = \"http://translate.local:5000\"\n").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.remote.endpoint, "http://translate.local:5000");
        assert_eq!(config.remote.timeout_secs, 10);
        assert!(config.remote.enabled);
        assert_eq!(config.history.path, PathBuf::from(".tarjoman/history.json"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("config.toml");

        let mut config = Config::default();
        config.remote.enabled = false;
        config.remote.api_key = Some("key".to_string());
        config.history.max_entries = 5;
        config.save_to_file(file.path()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert!(!loaded.remote.enabled);
        assert_eq!(loaded.remote.api_key.as_deref(), Some("key"));
        assert_eq!(loaded.history.max_entries, 5);
    }

    #[test]
    fn test_invalid_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("bad.toml");
        file.write_str("[remote\nendpoint =").unwrap();

        match Config::from_file(file.path()) {
            Err(TarjomanError::Config(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}

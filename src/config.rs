use crate::error::{XSearchError, API_KEY_ENV};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "grok-4-1-fast";
pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            // x_search can take a while to run its tool calls.
            timeout_secs: 300,
        }
    }
}

impl Config {
    /// `~/.config/x-search/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("x-search").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path when `path` is
    /// `None`. A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, XSearchError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, XSearchError> {
        let content = std::fs::read_to_string(path).map_err(|e| XSearchError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| XSearchError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Read the API key from the environment. Blank counts as missing.
pub fn api_key_from_env() -> Result<String, XSearchError> {
    api_key_from(std::env::var(API_KEY_ENV).ok())
}

fn api_key_from(value: Option<String>) -> Result<String, XSearchError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(XSearchError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "grok-4-1-fast");
        assert_eq!(config.base_url, "https://api.x.ai/v1");
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "model = \"grok-4\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.model, "grok-4");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, XSearchError::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_api_key() {
        assert_eq!(api_key_from(Some(" key ".to_string())).unwrap(), "key");
        assert!(matches!(
            api_key_from(Some("  ".to_string())),
            Err(XSearchError::MissingApiKey)
        ));
        assert!(matches!(api_key_from(None), Err(XSearchError::MissingApiKey)));
    }
}

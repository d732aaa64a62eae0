// ⚙️ Configuration - small JSON file, defaults when absent
//
// Lookup order:
// 1. $SUBSCRIPTION_EDITOR_CONFIG
// 2. <config dir>/subscription-editor/config.json

use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SUBSCRIPTION_EDITOR_CONFIG";
const APP_DIR: &str = "subscription-editor";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Printed before amounts (e.g., "$")
    pub currency_symbol: String,
    /// Pulse the terminal bell on key presses
    pub haptics: bool,
    /// Log file; defaults to the OS data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            haptics: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Load from the resolved config path
    pub fn load() -> Result<Config> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| EditorError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Log file from config, or `<data dir>/subscription-editor/subscription-editor.log`
    pub fn resolved_log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("subscription-editor.log"))
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_valid_file_loads_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "currency_symbol": "€", "haptics": false }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert!(!config.haptics);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "haptics": false }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert!(!config.haptics);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, EditorError::Config { .. }));
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/editor.log")),
            ..Config::default()
        };
        assert_eq!(config.resolved_log_file(), Some(PathBuf::from("/tmp/editor.log")));
    }
}

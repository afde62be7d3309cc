//! On-disk persistence for the tool's own configuration
//!
//! The configuration lives as pretty-printed JSON under the platform config
//! directory (e.g. `~/.config/scaffoldpy/config.json`). A missing file means a
//! first run; a file that no longer parses is treated as corrupt and gets
//! overwritten after the user re-answers the prompts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::Result;

const CONFIG_DIR_NAME: &str = "scaffoldpy";
const CONFIG_FILE_NAME: &str = "config.json";

/// Outcome of loading the stored configuration
#[derive(Debug)]
pub enum StoredConfig {
    Loaded(AppConfig),
    /// No configuration file yet (first run)
    Missing,
    /// File exists but is unreadable or fails validation
    Corrupt,
}

/// Platform-specific path of the configuration file, if a config directory
/// can be determined at all
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the stored configuration from the default location
pub fn load() -> StoredConfig {
    match config_path() {
        Some(path) => load_from(&path),
        None => StoredConfig::Missing,
    }
}

/// Load the stored configuration from an explicit path
pub fn load_from(path: &Path) -> StoredConfig {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return StoredConfig::Missing,
        Err(_) => return StoredConfig::Corrupt,
    };

    match serde_json::from_str::<AppConfig>(&contents) {
        Ok(config) => StoredConfig::Loaded(config),
        Err(_) => StoredConfig::Corrupt,
    }
}

/// Persist the configuration to the default location, creating the config
/// directory if needed. Returns the path written.
pub fn save(config: &AppConfig) -> Result<Option<PathBuf>> {
    match config_path() {
        Some(path) => {
            save_to(&path, config)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Persist the configuration to an explicit path
pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(matches!(load_from(&path), StoredConfig::Missing));
    }

    #[test]
    fn corrupt_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_from(&path), StoredConfig::Corrupt));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.user_config.author = "Ada Lovelace".to_string();
        config.user_config.author_email = "ada@example.com".to_string();
        save_to(&path, &config).unwrap();

        match load_from(&path) {
            StoredConfig::Loaded(loaded) => assert_eq!(loaded, config),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }
}

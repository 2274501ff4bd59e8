//! UI preferences persisted across runs: refresh interval, column-mode
//! override, and theme. Nothing else is written to disk here — issue data
//! is owned entirely by the backend client.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AbacusError, Result};
use crate::theme::Theme;

/// The persisted subset of startup preferences, round-tripped through TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedConfig {
    pub refresh_interval_secs: u64,
    pub auto_refresh: bool,
    /// `None` lets the tree pane auto-select columns vs. wrapped titles by width.
    pub column_mode: Option<bool>,
    pub theme: ThemeName,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
            auto_refresh: true,
            column_mode: None,
            theme: ThemeName::Default,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Default,
    Nord,
}

impl ThemeName {
    pub fn resolve(self) -> Theme {
        match self {
            ThemeName::Default => Theme::default(),
            ThemeName::Nord => Theme::nord(),
        }
    }
}

/// Default config file location: `<config_dir>/abacus/config.toml`, falling
/// back to a relative filename if the platform has no config directory.
pub fn default_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("abacus").join("config.toml"),
        None => PathBuf::from("abacus.toml"),
    }
}

/// Reads `path`, falling back to defaults on a missing file. A malformed
/// file is reported as an error rather than silently discarded, since it's
/// more likely a stale hand-edit than the program's own doing.
pub fn load(path: &Path) -> Result<PersistedConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PersistedConfig::default()),
        Err(e) => Err(AbacusError::Config(e)),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
/// Failures are logged and swallowed: losing a preference save is never
/// worth aborting the session over.
pub fn save(path: &Path, config: &PersistedConfig) {
    if let Err(e) = save_inner(path, config) {
        warn!(error = %e, path = %path.display(), "failed to persist config");
    }
}

fn save_inner(path: &Path, config: &PersistedConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(config)?;
    std::fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = load(&path).unwrap();
        assert_eq!(config.refresh_interval_secs, 5);
        assert!(config.auto_refresh);
        assert_eq!(config.column_mode, None);
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = PersistedConfig {
            refresh_interval_secs: 30,
            auto_refresh: false,
            column_mode: Some(true),
            theme: ThemeName::Nord,
        };
        save(&path, &config);
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.refresh_interval_secs, 30);
        assert!(!loaded.auto_refresh);
        assert_eq!(loaded.column_mode, Some(true));
        assert_eq!(loaded.theme, ThemeName::Nord);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid toml").unwrap();
        assert!(load(&path).is_err());
    }
}

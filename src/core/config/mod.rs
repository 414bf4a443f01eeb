//=========================================================================
// Runtime Configuration
//=========================================================================
//
// Window settings persisted as whitespace-separated `key value` pairs:
//
//   width 1280
//   height 720
//   fullscreen 0
//   vsync 1
//
// Loading never fails: a missing file yields defaults, and unknown keys
// or unparsable values are logged and skipped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};

//=== Constants ===========================================================

pub const DEFAULT_CONFIG_PATH: &str = "config.cfg";

//=== ConfigError =========================================================

/// Failure to persist the configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Config I/O error at {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

//=== GameConfig ==========================================================

/// Window size, fullscreen and vsync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl GameConfig {
    /// Parses `key value` pairs over the defaults.
    pub fn parse(source: &str) -> Self {
        let mut config = Self::default();
        let mut tokens = source.split_whitespace();

        while let Some(key) = tokens.next() {
            let Some(value) = tokens.next() else {
                warn!(target: "config", "Key '{}' has no value", key);
                break;
            };

            match key {
                "width" => set_parsed(&mut config.width, key, value),
                "height" => set_parsed(&mut config.height, key, value),
                "fullscreen" => set_flag(&mut config.fullscreen, key, value),
                "vsync" => set_flag(&mut config.vsync, key, value),
                _ => warn!(target: "config", "Ignoring unknown key '{}'", key),
            }
        }

        config
    }

    /// The on-disk form, keys in fixed order.
    pub fn serialize(&self) -> String {
        format!(
            "width {}\nheight {}\nfullscreen {}\nvsync {}\n",
            self.width,
            self.height,
            self.fullscreen as u8,
            self.vsync as u8
        )
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!(target: "config", "Invalid value '{}' for '{}'", value, key),
    }
}

fn set_flag(slot: &mut bool, key: &str, value: &str) {
    match value {
        "0" => *slot = false,
        "1" => *slot = true,
        _ => warn!(target: "config", "Invalid flag '{}' for '{}'", value, key),
    }
}

//=== ConfigStore =========================================================

/// A `GameConfig` bound to its file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, falling back to defaults.
    pub fn load(&self) -> GameConfig {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let config = GameConfig::parse(&contents);
                info!(target: "config", "Loaded {} ({}x{}, fullscreen: {}, vsync: {})",
                    self.path.display(), config.width, config.height, config.fullscreen, config.vsync);
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(target: "config", "{} not found, using defaults", self.path.display());
                GameConfig::default()
            }
            Err(e) => {
                warn!(target: "config", "Failed to read {}: {}; using defaults", self.path.display(), e);
                GameConfig::default()
            }
        }
    }

    /// Overwrites the file with `config`.
    pub fn save(&self, config: &GameConfig) -> Result<(), ConfigError> {
        std::fs::write(&self.path, config.serialize()).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(target: "config", "Saved {}", self.path.display());
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.cfg"));
        assert_eq!(store.load(), GameConfig::default());
    }

    #[test]
    fn parse_reads_all_keys() {
        let config = GameConfig::parse("width 1920\nheight 1080\nfullscreen 1\nvsync 0\n");
        assert_eq!(
            config,
            GameConfig { width: 1920, height: 1080, fullscreen: true, vsync: false }
        );
    }

    #[test]
    fn parse_skips_unknown_and_invalid() {
        let config = GameConfig::parse("gamma 2 width abc fullscreen yes height 900");
        assert_eq!(config.width, 1280);
        assert!(!config.fullscreen);
        assert_eq!(config.height, 900);
    }

    #[test]
    fn save_writes_fixed_format_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.cfg"));
        let config = GameConfig { width: 1920, height: 1080, fullscreen: true, vsync: true };

        store.save(&config).unwrap();

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(written, "width 1920\nheight 1080\nfullscreen 1\nvsync 1\n");
        assert_eq!(store.load(), config);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("missing").join("config.cfg"));
        assert!(matches!(store.save(&GameConfig::default()), Err(ConfigError::Io { .. })));
    }
}

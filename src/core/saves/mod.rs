//=========================================================================
// Save Games
//=========================================================================
//
// Flat-file save slots under a root directory (`saves/` by default).
//
// Architecture:
//   saves/<slot>/
//     ├─ player.dat     PlayerData, key=value lines
//     ├─ game.dat       version marker + creation time
//     └─ settings.dat   created / lastPlayed / lastSaved history
//
// A slot is valid iff all three files exist.
//
//=========================================================================

//=== Module Declarations =================================================

mod player_data;
mod save_store;

//=== Public API ==========================================================

pub use player_data::PlayerData;
pub use save_store::{is_valid_save_name, SaveSlot, SaveStore, DEFAULT_SAVES_DIR};

//=== External Dependencies ===============================================

use std::fmt;
use std::path::PathBuf;

//=== SaveError ===========================================================

#[derive(Debug)]
pub enum SaveError {
    /// Filesystem failure while touching `path`.
    Io { path: PathBuf, source: std::io::Error },

    /// Name is empty, too long, reserved or contains forbidden characters.
    InvalidName(String),

    /// A slot with this name already exists.
    AlreadyExists(String),

    /// No valid slot with this name.
    NotFound(String),

    /// A numeric field in `player.dat` did not parse.
    Parse { key: String, value: String },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "Save I/O error at {}: {}", path.display(), source),
            Self::InvalidName(name) => write!(f, "Invalid save name: {}", name),
            Self::AlreadyExists(name) => write!(f, "Save already exists: {}", name),
            Self::NotFound(name) => write!(f, "Save does not exist: {}", name),
            Self::Parse { key, value } => write!(f, "Invalid value '{}' for '{}'", value, key),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

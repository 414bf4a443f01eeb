//=========================================================================
// Save Store
//=========================================================================
//
// Creates, loads, updates, lists and deletes save slots.
//
// Flow:
//   generate_unique_save_name(base) → create_new_save(name, player)
//   load_save(name)     → PlayerData, appends lastPlayed
//   save_current(name)  → rewrites player.dat, appends lastSaved
//
// Names handed out by generate_unique_save_name are reserved for the
// lifetime of the store, so two calls in a row never collide even before
// either slot is written.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{PlayerData, SaveError};

//=== Constants ===========================================================

pub const DEFAULT_SAVES_DIR: &str = "saves";

const PLAYER_DATA_FILE: &str = "player.dat";
const GAME_DATA_FILE: &str = "game.dat";
const SETTINGS_FILE: &str = "settings.dat";

const MAX_NAME_LEN: usize = 50;
const MAX_SUFFIX: u32 = 1000;
/// Room for a `_999` suffix.
const SUFFIX_LEN: usize = 4;
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3", "LPT4",
];

//=== Helpers =============================================================

/// Local time as `YYYY-MM-DD HH:MM:SS`.
fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SaveError + '_ {
    move |source| SaveError::Io { path: path.to_path_buf(), source }
}

/// Whether `name` may be used as a slot directory.
pub fn is_valid_save_name(name: &str) -> bool {
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return false;
    }
    if name.contains(INVALID_CHARS) {
        return false;
    }
    let upper = name.to_ascii_uppercase();
    !RESERVED_NAMES.contains(&upper.as_str())
}

//=== SaveSlot ============================================================

/// Summary of one slot for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSlot {
    pub slot_name: String,
    pub player_name: String,
    pub creation_date: String,
    pub last_played_date: String,
    pub playtime: f32,
    pub level: i32,
    pub save_path: PathBuf,
    pub is_valid: bool,
}

//=== SaveStore ===========================================================

#[derive(Debug)]
pub struct SaveStore {
    root: PathBuf,
    reserved: HashSet<String>,
}

impl SaveStore {
    //--- Construction -----------------------------------------------------

    /// Store rooted at `root`; the directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), reserved: HashSet::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    //--- Queries ----------------------------------------------------------

    /// True iff `saves/<name>` exists and holds all three files.
    pub fn save_exists(&self, name: &str) -> bool {
        let dir = self.slot_dir(name);
        dir.is_dir() && Self::validate_save_directory(&dir)
    }

    pub fn validate_save_directory(path: &Path) -> bool {
        [PLAYER_DATA_FILE, GAME_DATA_FILE, SETTINGS_FILE]
            .iter()
            .all(|file| path.join(file).exists())
    }

    /// Every valid slot, most recently played first.
    pub fn list_slots(&self) -> Vec<SaveSlot> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(target: "saves", "Cannot list {}: {}", self.root.display(), e);
                return Vec::new();
            }
        };

        let mut slots: Vec<SaveSlot> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .map(|path| Self::read_slot(&path))
            .filter(|slot| slot.is_valid)
            .collect();

        slots.sort_by(|a, b| b.last_played_date.cmp(&a.last_played_date));
        slots
    }

    fn read_slot(path: &Path) -> SaveSlot {
        let mut slot = SaveSlot {
            slot_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            player_name: String::new(),
            creation_date: String::new(),
            last_played_date: String::new(),
            playtime: 0.0,
            level: 1,
            save_path: path.to_path_buf(),
            is_valid: false,
        };

        if !Self::validate_save_directory(path) {
            return slot;
        }

        let player = fs::read_to_string(path.join(PLAYER_DATA_FILE))
            .map_err(io_error(path))
            .and_then(|data| PlayerData::deserialize(&data));
        match player {
            Ok(player) => {
                slot.player_name = player.name;
                slot.level = player.level;
                slot.playtime = player.playtime;
            }
            Err(e) => {
                warn!(target: "saves", "Skipping slot {}: {}", slot.slot_name, e);
                return slot;
            }
        }

        if let Ok(settings) = fs::read_to_string(path.join(SETTINGS_FILE)) {
            for (key, value) in settings.lines().filter_map(|l| l.split_once('=')) {
                match key {
                    "created" => slot.creation_date = value.to_string(),
                    "lastPlayed" => slot.last_played_date = value.to_string(),
                    _ => {}
                }
            }
        }

        slot.is_valid = true;
        slot
    }

    //--- Naming -----------------------------------------------------------

    /// A valid name derived from `base` that no slot uses and this store
    /// has not handed out before. Reserved device names get a `_save`
    /// suffix.
    pub fn generate_unique_save_name(&mut self, base: &str) -> String {
        let mut clean: String = base
            .chars()
            .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
            .take(MAX_NAME_LEN - SUFFIX_LEN)
            .collect();
        if clean.is_empty() {
            clean = "NewSave".to_string();
        } else if !is_valid_save_name(&clean) {
            clean.push_str("_save");
        }

        let mut candidate = clean.clone();
        let mut counter = 1;
        while (self.is_taken(&candidate) || !is_valid_save_name(&candidate)) && counter < MAX_SUFFIX {
            candidate = format!("{}_{}", clean, counter);
            counter += 1;
        }

        self.reserved.insert(candidate.clone());
        candidate
    }

    fn is_taken(&self, name: &str) -> bool {
        self.reserved.contains(name) || self.slot_dir(name).exists()
    }

    //--- Operations -------------------------------------------------------

    /// Writes a fresh slot. A partially written slot is removed.
    pub fn create_new_save(&mut self, name: &str, player: &PlayerData) -> Result<(), SaveError> {
        if !is_valid_save_name(name) {
            warn!(target: "saves", "Invalid save name: {}", name);
            return Err(SaveError::InvalidName(name.to_string()));
        }
        if self.save_exists(name) {
            return Err(SaveError::AlreadyExists(name.to_string()));
        }

        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let dir = self.slot_dir(name);
        fs::create_dir(&dir).map_err(io_error(&dir))?;

        if let Err(e) = Self::write_default_files(&dir, player) {
            warn!(target: "saves", "Failed to create save {}: {}", name, e);
            if let Err(cleanup) = fs::remove_dir_all(&dir) {
                warn!(target: "saves", "Could not remove partial save {}: {}", dir.display(), cleanup);
            }
            return Err(e);
        }

        info!(target: "saves", "Created new save: {}", name);
        Ok(())
    }

    fn write_default_files(dir: &Path, player: &PlayerData) -> Result<(), SaveError> {
        let now = timestamp();

        let player_path = dir.join(PLAYER_DATA_FILE);
        fs::write(&player_path, player.serialize()).map_err(io_error(&player_path))?;

        let game_path = dir.join(GAME_DATA_FILE);
        let game = format!("# Game data file\nversion=1.0\ncreated={}\n", now);
        fs::write(&game_path, game).map_err(io_error(&game_path))?;

        let settings_path = dir.join(SETTINGS_FILE);
        let settings = format!("# Save settings\ncreated={}\nlastPlayed={}\n", now, now);
        fs::write(&settings_path, settings).map_err(io_error(&settings_path))?;

        Ok(())
    }

    /// Reads the slot's player data and records the access time.
    pub fn load_save(&self, name: &str) -> Result<PlayerData, SaveError> {
        if !self.save_exists(name) {
            return Err(SaveError::NotFound(name.to_string()));
        }
        let dir = self.slot_dir(name);

        let player_path = dir.join(PLAYER_DATA_FILE);
        let data = fs::read_to_string(&player_path).map_err(io_error(&player_path))?;
        let player = PlayerData::deserialize(&data)?;

        self.append_setting(&dir, "lastPlayed");
        info!(target: "saves", "Loaded save: {}", name);
        Ok(player)
    }

    /// Overwrites the slot's player data and records the save time.
    pub fn save_current(&self, name: &str, player: &PlayerData) -> Result<(), SaveError> {
        if !self.save_exists(name) {
            return Err(SaveError::NotFound(name.to_string()));
        }
        let dir = self.slot_dir(name);

        let player_path = dir.join(PLAYER_DATA_FILE);
        fs::write(&player_path, player.serialize()).map_err(io_error(&player_path))?;

        self.append_setting(&dir, "lastSaved");
        info!(target: "saves", "Saved: {}", name);
        Ok(())
    }

    pub fn delete_save(&mut self, name: &str) -> Result<(), SaveError> {
        if !self.save_exists(name) {
            return Err(SaveError::NotFound(name.to_string()));
        }
        let dir = self.slot_dir(name);
        fs::remove_dir_all(&dir).map_err(io_error(&dir))?;
        self.reserved.remove(name);

        info!(target: "saves", "Deleted save: {}", name);
        Ok(())
    }

    /// Appends `key=<now>` to settings.dat; failures are only logged.
    fn append_setting(&self, dir: &Path, key: &str) {
        let path = dir.join(SETTINGS_FILE);
        let result = OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{}={}", key, timestamp()));

        if let Err(e) = result {
            warn!(target: "saves", "Could not update {}: {}", path.display(), e);
        }
    }
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVES_DIR)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SaveStore) {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        (dir, store)
    }

    fn write_slot(store: &SaveStore, name: &str, player: &str, last_played: &str) {
        let dir = store.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PLAYER_DATA_FILE), format!("name={}\nlevel=2\n", player)).unwrap();
        fs::write(dir.join(GAME_DATA_FILE), "version=1.0\n").unwrap();
        fs::write(
            dir.join(SETTINGS_FILE),
            format!("created=2024-01-01 00:00:00\nlastPlayed={}\n", last_played),
        )
        .unwrap();
    }

    //--- Naming -----------------------------------------------------------

    #[test]
    fn unique_names_are_distinct_in_a_row() {
        let (_dir, mut store) = store();

        assert_eq!(store.generate_unique_save_name("NewSave"), "NewSave");
        assert_eq!(store.generate_unique_save_name("NewSave"), "NewSave_1");
        assert_eq!(store.generate_unique_save_name("NewSave"), "NewSave_2");
    }

    #[test]
    fn unique_name_skips_existing_slots() {
        let (_dir, mut store) = store();
        store.create_new_save("Vex", &PlayerData::named("Vex")).unwrap();

        assert_eq!(store.generate_unique_save_name("Vex"), "Vex_1");
    }

    #[test]
    fn unique_name_sanitizes_input() {
        let (_dir, mut store) = store();
        assert_eq!(store.generate_unique_save_name("a/b:c"), "a_b_c");
        assert_eq!(store.generate_unique_save_name(""), "NewSave");
    }

    #[test]
    fn unique_name_avoids_reserved_devices() {
        let (_dir, mut store) = store();

        let first = store.generate_unique_save_name("aux");
        let second = store.generate_unique_save_name("Con");

        assert_eq!(first, "aux_save");
        assert_eq!(second, "Con_save");
        assert!(is_valid_save_name(&first) && is_valid_save_name(&second));
        assert_eq!(store.generate_unique_save_name("aux"), "aux_save_1");
    }

    #[test]
    fn unique_name_leaves_room_for_suffix() {
        let (_dir, mut store) = store();
        let long = "x".repeat(80);

        let first = store.generate_unique_save_name(&long);
        let second = store.generate_unique_save_name(&long);

        assert_eq!(first.len(), MAX_NAME_LEN - SUFFIX_LEN);
        assert_eq!(second, format!("{}_1", first));
        assert!(is_valid_save_name(&second));
        store.create_new_save(&second, &PlayerData::default()).unwrap();
    }

    #[test]
    fn name_validation_rules() {
        assert!(is_valid_save_name("Night City"));
        assert!(!is_valid_save_name(""));
        assert!(!is_valid_save_name(&"x".repeat(51)));
        assert!(is_valid_save_name(&"x".repeat(50)));
        for bad in ["a<b", "a>b", "a:b", "a\"b", "a/b", "a\\b", "a|b", "a?b", "a*b"] {
            assert!(!is_valid_save_name(bad), "{} should be rejected", bad);
        }
        for reserved in ["CON", "con", "Nul", "com3", "LPT4"] {
            assert!(!is_valid_save_name(reserved), "{} should be rejected", reserved);
        }
        assert!(is_valid_save_name("COM5"));
    }

    //--- Lifecycle --------------------------------------------------------

    #[test]
    fn create_writes_three_files() {
        let (_dir, mut store) = store();
        store.create_new_save("slot", &PlayerData::named("Vex")).unwrap();

        let dir = store.root().join("slot");
        assert!(store.save_exists("slot"));
        let game = fs::read_to_string(dir.join(GAME_DATA_FILE)).unwrap();
        assert!(game.starts_with("# Game data file\nversion=1.0\ncreated="));
        let settings = fs::read_to_string(dir.join(SETTINGS_FILE)).unwrap();
        assert!(settings.starts_with("# Save settings\ncreated="));
        assert!(settings.contains("\nlastPlayed="));
    }

    #[test]
    fn create_rejects_invalid_and_duplicate_names() {
        let (_dir, mut store) = store();
        let player = PlayerData::default();

        assert!(matches!(store.create_new_save("AUX", &player), Err(SaveError::InvalidName(_))));
        store.create_new_save("one", &player).unwrap();
        assert!(matches!(store.create_new_save("one", &player), Err(SaveError::AlreadyExists(_))));
    }

    #[test]
    fn load_returns_saved_player_and_touches_settings() {
        let (_dir, mut store) = store();
        let player = PlayerData { level: 4, playtime: 2.5, ..PlayerData::named("Kit") };
        store.create_new_save("kit", &player).unwrap();

        assert_eq!(store.load_save("kit").unwrap(), player);

        let settings = fs::read_to_string(store.root().join("kit").join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings.matches("lastPlayed=").count(), 2);
    }

    #[test]
    fn save_current_overwrites_player_data() {
        let (_dir, mut store) = store();
        store.create_new_save("kit", &PlayerData::named("Kit")).unwrap();

        let updated = PlayerData { experience: 500, ..PlayerData::named("Kit") };
        store.save_current("kit", &updated).unwrap();

        assert_eq!(store.load_save("kit").unwrap(), updated);
        let settings = fs::read_to_string(store.root().join("kit").join(SETTINGS_FILE)).unwrap();
        assert!(settings.contains("lastSaved="));
    }

    #[test]
    fn missing_slot_operations_fail() {
        let (_dir, mut store) = store();
        let player = PlayerData::default();

        assert!(matches!(store.load_save("ghost"), Err(SaveError::NotFound(_))));
        assert!(matches!(store.save_current("ghost", &player), Err(SaveError::NotFound(_))));
        assert!(matches!(store.delete_save("ghost"), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn incomplete_directory_is_not_a_save() {
        let (_dir, store) = store();
        let dir = store.root().join("broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PLAYER_DATA_FILE), "name=x\n").unwrap();

        assert!(!store.save_exists("broken"));
        assert!(!SaveStore::validate_save_directory(&dir));
        assert!(store.list_slots().is_empty());
    }

    #[test]
    fn delete_removes_slot() {
        let (_dir, mut store) = store();
        store.create_new_save("gone", &PlayerData::default()).unwrap();

        store.delete_save("gone").unwrap();
        assert!(!store.root().join("gone").exists());
    }

    #[test]
    fn list_sorts_by_last_played_descending() {
        let (_dir, store) = store();
        write_slot(&store, "old", "Ada", "2024-01-02 10:00:00");
        write_slot(&store, "new", "Bo", "2024-03-05 08:30:00");
        write_slot(&store, "mid", "Cy", "2024-02-01 00:00:00");

        let slots = store.list_slots();
        let names: Vec<_> = slots.iter().map(|s| s.slot_name.as_str()).collect();
        assert_eq!(names, ["new", "mid", "old"]);
        assert_eq!(slots[0].player_name, "Bo");
        assert_eq!(slots[0].level, 2);
        assert_eq!(slots[0].creation_date, "2024-01-01 00:00:00");
        assert!(slots.iter().all(|s| s.is_valid));
    }

    #[test]
    fn list_on_missing_root_is_empty() {
        let (_dir, store) = store();
        assert!(store.list_slots().is_empty());
    }
}

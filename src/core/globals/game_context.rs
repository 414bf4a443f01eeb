//=========================================================================
// Game Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - config / config_store: window settings and their file
// - saves: the save-slot store
// - assets: shared texture and font cache
// - character: the record threaded through the creation flow
// - input_state: low-level input state (held keys, cursor, modifiers)
//
// Plus the signals scenes raise for the platform: exit requests and
// config changes that must be re-applied to the window.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetCache;
use crate::core::character::CharacterRecord;
use crate::core::config::{ConfigError, ConfigStore, GameConfig};
use crate::core::input::StateTracker;
use crate::core::saves::{PlayerData, SaveError, SaveStore};

//=== Constants ===========================================================

/// Layout reference resolution every screen scales from.
pub const REFERENCE_WIDTH: f32 = 1280.0;
pub const REFERENCE_HEIGHT: f32 = 720.0;

/// Slot name used when the character has no name.
const FALLBACK_SAVE_NAME: &str = "NewSave";

//=== LoadedGame ==========================================================

/// The save slot the session is currently bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGame {
    pub slot: String,
    pub player: PlayerData,
}

//=== GameContext =========================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&GameContext` while rendering and `&mut GameContext`
/// during update and input handling.
pub struct GameContext {
    /// Active window settings.
    pub config: GameConfig,

    /// Where `config` is persisted.
    pub config_store: ConfigStore,

    pub saves: SaveStore,

    pub assets: AssetCache,

    /// The character being created. Reset by `begin_creation`.
    pub character: CharacterRecord,

    /// Raw input state, updated before each event reaches a scene.
    pub input_state: StateTracker,

    session: Option<LoadedGame>,
    window_size: (u32, u32),
    exit_requested: bool,
    config_dirty: bool,
    seed: Option<u64>,
    rng_streams: u64,
}

impl GameContext {
    //--- Construction -----------------------------------------------------

    /// Creates a context, loading the config from `config_store`.
    ///
    /// With `seed`, every RNG handed out by [`make_rng`](Self::make_rng)
    /// is deterministic.
    pub fn new(
        config_store: ConfigStore,
        saves: SaveStore,
        assets: AssetCache,
        seed: Option<u64>,
    ) -> Self {
        let config = config_store.load();
        Self {
            window_size: (config.width, config.height),
            config,
            config_store,
            saves,
            assets,
            character: CharacterRecord::new(),
            input_state: StateTracker::new(),
            session: None,
            exit_requested: false,
            config_dirty: false,
            seed,
            rng_streams: 0,
        }
    }

    //--- Window -----------------------------------------------------------

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Horizontal and vertical scale relative to 1280x720.
    pub fn scale(&self) -> (f32, f32) {
        (
            self.window_size.0 as f32 / REFERENCE_WIDTH,
            self.window_size.1 as f32 / REFERENCE_HEIGHT,
        )
    }

    /// Uniform scale for sizes (the smaller axis).
    pub fn uniform_scale(&self) -> f32 {
        let (sx, sy) = self.scale();
        sx.min(sy)
    }

    //--- Signals ----------------------------------------------------------

    pub fn request_exit(&mut self) {
        info!(target: "scene", "Exit requested");
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Persists `config`, makes it active and flags it for the window.
    pub fn apply_config(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        self.config_store.save(&config)?;
        self.config = config;
        self.config_dirty = true;
        Ok(())
    }

    /// Returns the config once after it changed.
    pub fn take_config_change(&mut self) -> Option<GameConfig> {
        std::mem::take(&mut self.config_dirty).then_some(self.config)
    }

    //--- Randomness -------------------------------------------------------

    /// A fresh RNG stream: derived from the seed if one was given,
    /// otherwise from system entropy.
    pub fn make_rng(&mut self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => {
                self.rng_streams += 1;
                ChaCha8Rng::seed_from_u64(seed.wrapping_add(self.rng_streams))
            }
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        }
    }

    //--- Creation Flow ----------------------------------------------------

    /// Starts a new creation flow with a blank character.
    pub fn begin_creation(&mut self) {
        info!(target: "scene", "Starting character creation");
        self.character = CharacterRecord::new();
    }

    /// Hands the finished character off to a new save slot.
    ///
    /// Returns the slot name.
    pub fn complete_creation(&mut self) -> Result<String, SaveError> {
        let name = self.character.name().unwrap_or_default().to_string();
        let base = if name.is_empty() { FALLBACK_SAVE_NAME } else { name.as_str() };

        let slot = self.saves.generate_unique_save_name(base);
        let player = PlayerData::named(name.clone());
        self.saves.create_new_save(&slot, &player)?;

        info!(target: "scene", "Character {} ({}, power {}) saved to slot {}",
            if name.is_empty() { "<unnamed>" } else { name.as_str() },
            self.character.archetype(), self.character.power_level(), slot);

        self.session = Some(LoadedGame { slot: slot.clone(), player });
        Ok(slot)
    }

    //--- Sessions ---------------------------------------------------------

    pub fn session(&self) -> Option<&LoadedGame> {
        self.session.as_ref()
    }

    /// Loads the most recently played valid slot, if any.
    pub fn load_most_recent(&mut self) -> Result<Option<&LoadedGame>, SaveError> {
        let Some(slot) = self.saves.list_slots().into_iter().next() else {
            warn!(target: "saves", "No save slots to load");
            return Ok(None);
        };

        let player = self.saves.load_save(&slot.slot_name)?;
        info!(target: "saves", "Resumed {} (level {}, {:.2}h played)",
            player.name, player.level, player.playtime);
        self.session = Some(LoadedGame { slot: slot.slot_name, player });
        Ok(self.session.as_ref())
    }
}

//=== Test Support ========================================================

#[cfg(test)]
impl GameContext {
    /// Context whose config and saves live under `dir`, seeded RNGs.
    pub(crate) fn in_dir(dir: &std::path::Path) -> Self {
        Self::new(
            ConfigStore::new(dir.join("config.cfg")),
            SaveStore::new(dir.join("saves")),
            AssetCache::new(dir),
            Some(7),
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use tempfile::TempDir;

    #[test]
    fn new_context_uses_config_size() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.cfg"), "width 1920 height 1080").unwrap();
        let ctx = GameContext::in_dir(dir.path());

        assert_eq!(ctx.window_size(), (1920, 1080));
        assert_eq!(ctx.scale(), (1.5, 1.5));
    }

    #[test]
    fn uniform_scale_uses_smaller_axis() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        ctx.set_window_size(2560, 720);
        assert_eq!(ctx.uniform_scale(), 1.0);
    }

    #[test]
    fn config_change_is_taken_once() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        let config = GameConfig { fullscreen: true, ..GameConfig::default() };

        ctx.apply_config(config).unwrap();

        assert_eq!(ctx.take_config_change(), Some(config));
        assert_eq!(ctx.take_config_change(), None);
        assert_eq!(ctx.config_store.load(), config);
    }

    #[test]
    fn seeded_rngs_are_reproducible_but_distinct() {
        let dir = TempDir::new().unwrap();
        let mut a = GameContext::in_dir(dir.path());
        let mut b = GameContext::in_dir(dir.path());

        let first: u64 = a.make_rng().random();
        let second: u64 = a.make_rng().random();
        assert_ne!(first, second);
        assert_eq!(first, b.make_rng().random::<u64>());
    }

    #[test]
    fn complete_creation_saves_named_slot() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        ctx.begin_creation();
        ctx.character.set_name("Vex");

        assert_eq!(ctx.complete_creation().unwrap(), "Vex");
        assert_eq!(ctx.saves.load_save("Vex").unwrap().name, "Vex");
        assert_eq!(ctx.session().map(|s| s.slot.as_str()), Some("Vex"));
    }

    #[test]
    fn reserved_character_name_still_saves() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        ctx.begin_creation();
        ctx.character.set_name("Con");

        let slot = ctx.complete_creation().unwrap();

        assert_eq!(slot, "Con_save");
        assert_eq!(ctx.saves.load_save(&slot).unwrap().name, "Con");
    }

    #[test]
    fn unnamed_creations_get_distinct_slots() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());

        ctx.begin_creation();
        assert_eq!(ctx.complete_creation().unwrap(), "NewSave");
        ctx.begin_creation();
        assert_eq!(ctx.complete_creation().unwrap(), "NewSave_1");
    }

    #[test]
    fn load_most_recent_binds_session() {
        let dir = TempDir::new().unwrap();
        let mut ctx = GameContext::in_dir(dir.path());
        assert_eq!(ctx.load_most_recent().unwrap(), None);

        ctx.saves.create_new_save("kit", &PlayerData::named("Kit")).unwrap();
        let loaded = ctx.load_most_recent().unwrap().cloned();
        assert_eq!(loaded.map(|g| g.player.name), Some("Kit".to_string()));
    }
}

//=========================================================================
// Neurocipher Engine
//
// Main entry point: wires persistent stores, assets and the scene flow
// together and hands them to the platform loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config_path()      ├─ GameContext (config, saves, assets)
//         ├─ with_saves_dir()        ├─ SceneManager (starts on Splash)
//         ├─ with_asset_root()       └─ Platform event loop
//         └─ with_seed()                blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetCache;
use crate::core::config::{ConfigStore, DEFAULT_CONFIG_PATH};
use crate::core::globals::GameContext;
use crate::core::saves::{SaveStore, DEFAULT_SAVES_DIR};
use crate::core::scene::{SceneId, SceneManager};
use crate::platform::Platform;
use crate::scenes::build_scene;

//=== Constants ===========================================================

const DEFAULT_ASSET_ROOT: &str = ".";

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config file**: `config.cfg`
/// - **Saves directory**: `saves`
/// - **Asset root**: current directory
/// - **Seed**: none (entropy-seeded randomness)
///
/// # Examples
///
/// ```no_run
/// use neurocipher::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_saves_dir("profiles/saves")
///     .with_seed(42)
///     .build()
///     .run();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    config_path: PathBuf,
    saves_dir: PathBuf,
    asset_root: PathBuf,
    seed: Option<u64>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            saves_dir: PathBuf::from(DEFAULT_SAVES_DIR),
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            seed: None,
        }
    }

    /// Sets the config file read at startup and written by the settings
    /// screen.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Sets the directory holding one subdirectory per save slot.
    pub fn with_saves_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = dir.into();
        self
    }

    /// Sets the directory asset paths (`assets/...`) are resolved against.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Makes glitch noise and appearance randomization reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (config: {}, saves: {}, assets: {})",
            self.config_path.display(),
            self.saves_dir.display(),
            self.asset_root.display()
        );

        Engine {
            config_path: self.config_path,
            saves_dir: self.saves_dir,
            asset_root: self.asset_root,
            seed: self.seed,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Neurocipher runtime.
///
/// Create via [`EngineBuilder`] with `EngineBuilder::new().build()`.
#[derive(Debug)]
pub struct Engine {
    config_path: PathBuf,
    saves_dir: PathBuf,
    asset_root: PathBuf,
    seed: Option<u64>,
}

impl Engine {
    //--- Construction -----------------------------------------------------

    /// Creates the game session the platform loop will drive.
    fn create_context(&self) -> GameContext {
        GameContext::new(
            ConfigStore::new(&self.config_path),
            SaveStore::new(&self.saves_dir),
            AssetCache::new(&self.asset_root),
            self.seed,
        )
    }

    //--- Execution --------------------------------------------------------

    /// Starts the game and blocks until the window closes or the player
    /// picks Exit.
    ///
    /// Platform failures are logged; the process then returns normally.
    pub fn run(self) {
        let mut ctx = self.create_context();
        let (width, height) = ctx.window_size();
        info!(
            "Starting Neurocipher ({}x{}, fullscreen {}, vsync {})",
            width, height, ctx.config.fullscreen, ctx.config.vsync
        );

        let scenes = SceneManager::new(build_scene, SceneId::Splash, &mut ctx);
        let platform = Platform::new(ctx, scenes);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

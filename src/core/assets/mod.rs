//=========================================================================
// Asset Cache
//=========================================================================
//
// Shared, path-keyed ownership of textures and fonts.
//
// Architecture:
//   AssetCache
//     ├─ textures: HashMap<PathBuf, Option<Rc<Texture>>>
//     └─ fonts:    HashMap<PathBuf, Option<Rc<Font>>>
//
// Flow:
//   texture(path) → cached? → return handle (or cached miss)
//                 → else load once, log on failure, remember the result
//
// Loading never fails the caller: a missing or corrupt asset is logged
// once and reported as `None`, and screens degrade to untextured or
// text-less rendering.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::render::{Font, Texture};

//=== Constants ===========================================================

/// Font candidates, tried in order until one loads.
pub const FONT_FALLBACK_PATHS: &[&str] = &[
    "assets/fonts/digital-7 (italic).ttf",
    "assets/fonts/arial.ttf",
    "arial.ttf",
    "../assets/fonts/arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\calibri.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

//=== AssetError ==========================================================

/// Failure to read or decode an asset file.
#[derive(Debug)]
pub enum AssetError {
    /// The file could not be read.
    Io(std::io::Error),

    /// The image data could not be decoded.
    Decode(image::ImageError),

    /// The font data was rejected by the rasterizer.
    Font(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Decode(e) => write!(f, "Image decode error: {}", e),
            Self::Font(e) => write!(f, "Font error: {}", e),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Font(_) => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        Self::Decode(e)
    }
}

//=== AssetCache ==========================================================

/// Loads each asset path at most once and hands out shared handles.
pub struct AssetCache {
    root: PathBuf,
    textures: HashMap<PathBuf, Option<Rc<Texture>>>,
    fonts: HashMap<PathBuf, Option<Rc<Font>>>,
    fallback_texture: Rc<Texture>,
}

impl AssetCache {
    //--- Construction -----------------------------------------------------

    /// Creates a cache resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            textures: HashMap::new(),
            fonts: HashMap::new(),
            fallback_texture: Rc::new(Texture::fallback()),
        }
    }

    //--- Textures ---------------------------------------------------------

    /// Returns the texture at `path`, loading it on first request.
    pub fn texture(&mut self, path: &str) -> Option<Rc<Texture>> {
        let resolved = self.resolve(path);
        if let Some(cached) = self.textures.get(&resolved) {
            return cached.clone();
        }

        let loaded = match Texture::load(&resolved) {
            Ok(texture) => {
                debug!(target: "assets", "Loaded texture {} ({}x{})",
                    resolved.display(), texture.width(), texture.height());
                Some(Rc::new(texture))
            }
            Err(e) => {
                warn!(target: "assets", "Failed to load texture {}: {}", resolved.display(), e);
                None
            }
        };

        self.textures.insert(resolved, loaded.clone());
        loaded
    }

    /// Returns the first texture in `paths` that loads.
    pub fn texture_with_fallback(&mut self, paths: &[String]) -> Option<Rc<Texture>> {
        paths.iter().find_map(|path| self.texture(path))
    }

    /// Registers an in-memory texture under `path`.
    pub fn insert_texture(&mut self, path: &str, texture: Texture) -> Rc<Texture> {
        let handle = Rc::new(texture);
        self.textures.insert(self.resolve(path), Some(handle.clone()));
        handle
    }

    /// Procedural placeholder for missing portrait parts.
    pub fn fallback_texture(&self) -> Rc<Texture> {
        self.fallback_texture.clone()
    }

    //--- Fonts ------------------------------------------------------------

    /// Returns the font at `path`, loading it on first request.
    pub fn font(&mut self, path: &str) -> Option<Rc<Font>> {
        let resolved = self.resolve(path);
        if let Some(cached) = self.fonts.get(&resolved) {
            return cached.clone();
        }

        let loaded = match Font::load(&resolved) {
            Ok(font) => {
                info!(target: "assets", "Font loaded from {}", resolved.display());
                Some(Rc::new(font))
            }
            Err(e) => {
                debug!(target: "assets", "Font candidate {} rejected: {}", resolved.display(), e);
                None
            }
        };

        self.fonts.insert(resolved, loaded.clone());
        loaded
    }

    /// Tries each of `paths` once, returning the first font that loads.
    pub fn font_with_fallback(&mut self, paths: &[&str]) -> Option<Rc<Font>> {
        let font = paths.iter().find_map(|path| self.font(path));
        if font.is_none() {
            warn!(target: "assets", "Could not load any font file; text will not be drawn");
        }
        font
    }

    /// The UI font, resolved through [`FONT_FALLBACK_PATHS`].
    pub fn default_font(&mut self) -> Option<Rc<Font>> {
        self.font_with_fallback(FONT_FALLBACK_PATHS)
    }

    //--- Internal Helpers -------------------------------------------------

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(".")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        image.save(dir.path().join(name)).unwrap();
    }

    #[test]
    fn texture_loads_and_is_shared() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "menu.png", 3, 2);
        let mut cache = AssetCache::new(dir.path());

        let first = cache.texture("menu.png").expect("texture should load");
        let second = cache.texture("menu.png").expect("texture should be cached");

        assert_eq!(first.size(), (3, 2));
        assert!(Rc::ptr_eq(&first, &second), "Same path must share one handle");
    }

    #[test]
    fn texture_is_read_from_disk_once() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "splash.png", 1, 1);
        let mut cache = AssetCache::new(dir.path());

        assert!(cache.texture("splash.png").is_some());
        std::fs::remove_file(dir.path().join("splash.png")).unwrap();
        assert!(cache.texture("splash.png").is_some(), "Cached texture survives file removal");
    }

    #[test]
    fn missing_texture_is_cached_as_miss() {
        let dir = TempDir::new().unwrap();
        let mut cache = AssetCache::new(dir.path());

        assert!(cache.texture("nope.png").is_none());
        write_png(&dir, "nope.png", 1, 1);
        assert!(cache.texture("nope.png").is_none(), "Misses are not retried");
    }

    #[test]
    fn fallback_list_returns_first_loadable() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "b.png", 4, 4);
        let mut cache = AssetCache::new(dir.path());

        let texture = cache.texture_with_fallback(&["a.png".to_string(), "b.png".to_string()]);
        assert_eq!(texture.map(|t| t.size()), Some((4, 4)));
    }

    #[test]
    fn inserted_texture_is_served() {
        let mut cache = AssetCache::new("unused-root");
        let inserted = cache.insert_texture("parts/base.png", Texture::fallback());
        let fetched = cache.texture("parts/base.png").unwrap();
        assert!(Rc::ptr_eq(&inserted, &fetched));
    }

    #[test]
    fn font_fallback_reports_none_when_nothing_loads() {
        let dir = TempDir::new().unwrap();
        let mut cache = AssetCache::new(dir.path());
        assert!(cache.font_with_fallback(&["a.ttf", "b.ttf"]).is_none());
    }

    #[test]
    fn asset_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AssetError>();
    }
}

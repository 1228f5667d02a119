//! Sprite and sound loading
//!
//! Every asset is optional. A missing or undecodable file logs a warning and
//! the renderer/audio fall back to solid colours or silence.

use std::path::PathBuf;
use std::sync::Arc;

pub const CRAFT_SPRITE: &str = "spaceship.png";
pub const OBSTACLE_SPRITE: &str = "asteroid.png";
pub const SCORE_SOUND: &str = "score.wav";
pub const HIT_SOUND: &str = "hit.wav";
pub const GAME_OVER_SOUND: &str = "gameover.wav";

/// Decoded RGBA image
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA pixels
    pub pixels: Vec<[u8; 4]>,
}

impl Sprite {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Nearest-neighbour sample at normalized coordinates in [0, 1)
    pub fn sample(&self, u: f32, v: f32) -> Option<[u8; 4]> {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }
        let x = (u * self.width as f32) as u32;
        let y = (v * self.height as f32) as u32;
        self.pixel(x, y)
    }
}

/// Encoded audio bytes, decoded at playback time
#[derive(Debug, Clone, PartialEq)]
pub struct SoundClip(pub Arc<[u8]>);

impl SoundClip {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Capability for fetching assets by name
pub trait AssetLoader {
    fn load_sprite(&self, name: &str) -> Option<Sprite>;
    fn load_sound(&self, name: &str) -> Option<SoundClip>;
}

/// Loads assets from a directory on disk
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_sprite(&self, name: &str) -> Option<Sprite> {
        let path = self.root.join(name);
        match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                log::debug!("Loaded sprite {} ({}x{})", path.display(), width, height);
                Some(Sprite {
                    width,
                    height,
                    pixels: rgba.pixels().map(|p| p.0).collect(),
                })
            }
            Err(e) => {
                log::warn!("Sprite {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    fn load_sound(&self, name: &str) -> Option<SoundClip> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Some(SoundClip(bytes.into())),
            Err(e) => {
                log::warn!("Sound {} unavailable: {}", path.display(), e);
                None
            }
        }
    }
}

/// Loader that never finds anything (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetLoader for NoAssets {
    fn load_sprite(&self, _name: &str) -> Option<Sprite> {
        None
    }

    fn load_sound(&self, _name: &str) -> Option<SoundClip> {
        None
    }
}

/// Everything the game tries to load at startup
#[derive(Debug, Clone, Default)]
pub struct GameAssets {
    pub craft: Option<Sprite>,
    pub obstacle: Option<Sprite>,
    pub score: Option<SoundClip>,
    pub hit: Option<SoundClip>,
    pub game_over: Option<SoundClip>,
}

impl GameAssets {
    pub fn load(loader: &impl AssetLoader) -> Self {
        let assets = Self {
            craft: loader.load_sprite(CRAFT_SPRITE),
            obstacle: loader.load_sprite(OBSTACLE_SPRITE),
            score: loader.load_sound(SCORE_SOUND),
            hit: loader.load_sound(HIT_SOUND),
            game_over: loader.load_sound(GAME_OVER_SOUND),
        };
        log::info!(
            "Assets: craft={} obstacle={} sounds={}/3",
            assets.craft.is_some(),
            assets.obstacle.is_some(),
            [&assets.score, &assets.hit, &assets.game_over]
                .iter()
                .filter(|c| c.is_some())
                .count()
        );
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("space-dodger-assets-{}", std::process::id()))
            .join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let loader = FsAssetLoader::new("/definitely/not/here");
        let assets = GameAssets::load(&loader);
        assert!(assets.craft.is_none());
        assert!(assets.obstacle.is_none());
        assert!(assets.score.is_none());
        assert!(assets.hit.is_none());
        assert!(assets.game_over.is_none());
    }

    #[test]
    fn test_no_assets_loads_nothing() {
        let assets = GameAssets::load(&NoAssets);
        assert!(assets.craft.is_none());
        assert!(assets.obstacle.is_none());
        assert!(assets.score.is_none());
        assert!(assets.hit.is_none());
        assert!(assets.game_over.is_none());
    }

    #[test]
    fn test_loads_png_sprite() {
        let dir = scratch_dir("png");
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(dir.join(CRAFT_SPRITE)).unwrap();

        let sprite = FsAssetLoader::new(&dir).load_sprite(CRAFT_SPRITE).unwrap();
        assert_eq!((sprite.width, sprite.height), (2, 2));
        assert_eq!(sprite.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(sprite.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(sprite.pixel(2, 0), None);
    }

    #[test]
    fn test_corrupt_sprite_is_skipped() {
        let dir = scratch_dir("corrupt");
        std::fs::write(dir.join(OBSTACLE_SPRITE), b"not a png").unwrap();
        assert!(FsAssetLoader::new(&dir).load_sprite(OBSTACLE_SPRITE).is_none());
    }

    #[test]
    fn test_sound_is_raw_bytes() {
        let dir = scratch_dir("sound");
        std::fs::write(dir.join(HIT_SOUND), b"RIFF").unwrap();
        let clip = FsAssetLoader::new(&dir).load_sound(HIT_SOUND).unwrap();
        assert_eq!(clip.bytes(), b"RIFF");
    }

    #[test]
    fn test_sample_bounds() {
        let sprite = Sprite {
            width: 2,
            height: 1,
            pixels: vec![[1, 1, 1, 255], [2, 2, 2, 255]],
        };
        assert_eq!(sprite.sample(0.0, 0.0), Some([1, 1, 1, 255]));
        assert_eq!(sprite.sample(0.75, 0.5), Some([2, 2, 2, 255]));
        assert_eq!(sprite.sample(1.0, 0.5), None);
        assert_eq!(sprite.sample(-0.1, 0.5), None);
    }
}

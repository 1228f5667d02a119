//! Space Dodger - a side-scrolling arcade game for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Session wiring (input queue, sound cues, high-score persistence)
//! - `renderer`: Half-block terminal rendering
//! - `platform`: Key mapping, frame clock, terminal setup
//! - `persistence` / `highscores`: The persisted best score
//! - `assets` / `audio`: Sprites and sound cues, all optional

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (~60 Hz)
    pub const TICK: Duration = Duration::from_millis(16);
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Logical viewport, independent of terminal size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_X: f32 = 100.0;
    pub const CRAFT_START_Y: f32 = 250.0;
    pub const CRAFT_WIDTH: f32 = 40.0;
    pub const CRAFT_HEIGHT: f32 = 40.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 1.0;
    /// Velocity set (not added) by the ascend action
    pub const ASCEND_IMPULSE: f32 = -10.0;

    pub const START_LIVES: u8 = 3;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 60;
    /// Height range size, so heights fall in [60, 140)
    pub const OBSTACLE_HEIGHT_SPREAD: u32 = 80;
    pub const OBSTACLE_BASE_SPEED: u64 = 5;
    /// One extra pixel of speed per this many points
    pub const SPEED_SCORE_DIVISOR: u64 = 20;

    /// Spawn pacing (ticks between spawns)
    pub const BASE_SPAWN_THRESHOLD: u64 = 50;
    pub const MIN_SPAWN_THRESHOLD: u64 = 20;
    /// Threshold shrinks by one tick per this many points
    pub const THRESHOLD_SCORE_DIVISOR: u64 = 10;

    /// Explosion overlay lifetime in ticks
    pub const EXPLOSION_FRAMES: u32 = 15;

    /// Starfield
    pub const STAR_COUNT: usize = 60;
    pub const STAR_MIN_SPEED: u32 = 1;
    pub const STAR_MAX_SPEED: u32 = 3;

    /// Background gradient phase advance per tick (radians)
    pub const GRADIENT_PHASE_STEP: f32 = 0.01;
    /// Game-over overlay fade-in per tick
    pub const GAME_OVER_FADE_STEP: f32 = 0.03;
}

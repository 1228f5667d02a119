//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - No rendering, audio or file I/O (side effects leave as `GameEvent`s)

pub mod background;
pub mod collision;
pub mod state;
pub mod tick;

pub use background::{GradientPhase, Star, Starfield};
pub use collision::Rect;
pub use state::{Craft, Explosion, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, obstacle_speed, spawn_threshold, tick};

//! Game state and core simulation types
//!
//! All mutable simulation state lives in [`GameState`]; the tick function is the
//! only writer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::background::{GradientPhase, Starfield};
use super::collision::Rect;
use crate::consts::*;

/// Session phase, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, only the background animates
    NotStarted,
    /// Active gameplay
    Running,
    /// Started and frozen by the pause toggle
    Paused,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Side effects requested by the simulation. The engine never performs them
/// itself; the caller drains and dispatches them after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An obstacle scrolled off the left edge
    Scored,
    /// An obstacle hit the craft
    Hit,
    /// Last life lost
    GameOver,
    /// The session beat the stored high score
    NewHighScore(u64),
}

/// The player's craft. Horizontal position and size are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    pub y: f32,
    /// Vertical velocity, positive is downward
    pub vel: f32,
}

impl Default for Craft {
    fn default() -> Self {
        Self {
            y: CRAFT_START_Y,
            vel: 0.0,
        }
    }
}

impl Craft {
    pub fn bounds(&self) -> Rect {
        Rect::new(CRAFT_X, self.y, CRAFT_WIDTH, CRAFT_HEIGHT)
    }

    /// Highest valid `y` (craft resting on the bottom edge)
    pub fn max_y() -> f32 {
        VIEWPORT_HEIGHT - CRAFT_HEIGHT
    }

    /// Apply gravity, move, and clamp to the viewport. Overshoot is discarded
    /// (no bounce); velocity is left as is.
    pub fn integrate(&mut self) {
        self.vel += GRAVITY;
        self.y += self.vel;
        self.y = self.y.clamp(0.0, Self::max_y());
    }

    /// Override velocity with the fixed upward impulse
    pub fn ascend(&mut self) {
        self.vel = ASCEND_IMPULSE;
    }

    /// Display tilt in degrees, clockwise on screen while climbing
    pub fn tilt_degrees(&self) -> f32 {
        (-self.vel * 2.0).clamp(-20.0, 20.0)
    }
}

/// An obstacle scrolling in from the right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

/// Transient explosion overlay, no gameplay effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub active: bool,
    /// Top-left of the craft at the moment of impact
    pub pos: Vec2,
    pub frame: u32,
}

impl Explosion {
    pub fn trigger(&mut self, pos: Vec2) {
        self.active = true;
        self.pos = pos;
        self.frame = 0;
    }

    /// Advance the frame counter, switching off after the last frame
    pub fn advance(&mut self) {
        if self.active {
            self.frame += 1;
            if self.frame > EXPLOSION_FRAMES {
                self.active = false;
            }
        }
    }
}

/// Complete game state (deterministic given the RNG stream, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Set by the first start action, never cleared
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub craft: Craft,
    /// Live obstacles (ordered by spawn)
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub lives: u8,
    /// Best score seen across sessions (loaded from the score store)
    pub high_score: u64,
    /// Ticks since the last spawn
    pub spawn_counter: u64,
    pub explosion: Explosion,
    /// Game-over overlay opacity, 0..=1
    pub game_over_alpha: f32,
    pub starfield: Starfield,
    pub gradient: GradientPhase,
    /// Simulation tick counter (all ticks, including title screen)
    pub time_ticks: u64,
    /// Side effects produced by the last tick(s), not yet dispatched
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh, not-yet-started game
    pub fn new<R: Rng>(high_score: u64, rng: &mut R) -> Self {
        Self {
            started: false,
            paused: false,
            game_over: false,
            craft: Craft::default(),
            obstacles: Vec::new(),
            score: 0,
            lives: START_LIVES,
            high_score,
            spawn_counter: 0,
            explosion: Explosion::default(),
            game_over_alpha: 0.0,
            starfield: Starfield::new(rng),
            gradient: GradientPhase::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset everything a session owns. `started`, the high score and the
    /// background phase survive.
    pub fn reset_session<R: Rng>(&mut self, rng: &mut R) {
        self.paused = false;
        self.game_over = false;
        self.craft = Craft::default();
        self.obstacles.clear();
        self.score = 0;
        self.lives = START_LIVES;
        self.spawn_counter = 0;
        self.explosion = Explosion::default();
        self.game_over_alpha = 0.0;
        self.starfield = Starfield::new(rng);
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::NotStarted
        } else if self.game_over {
            GamePhase::GameOver
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle at the right edge
    pub fn spawn_obstacle(&mut self, y: f32, height: f32) {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(VIEWPORT_WIDTH, y, OBSTACLE_WIDTH, height),
        });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

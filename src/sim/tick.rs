//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// One-shot input commands collected between ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the upward impulse (Up arrow)
    pub ascend: bool,
    /// Pause toggle (P)
    pub toggle_pause: bool,
    /// Start / restart (Space)
    pub start: bool,
}

/// Ticks between spawns at the given score
pub fn spawn_threshold(score: u64) -> u64 {
    BASE_SPAWN_THRESHOLD
        .saturating_sub(score / THRESHOLD_SCORE_DIVISOR)
        .max(MIN_SPAWN_THRESHOLD)
}

/// Leftward obstacle speed (pixels per tick) at the given score
pub fn obstacle_speed(score: u64) -> f32 {
    (OBSTACLE_BASE_SPEED + score / SPEED_SCORE_DIVISOR) as f32
}

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    apply_input(state, input, rng);

    state.time_ticks += 1;

    // Background animates in every phase
    state.gradient.advance();
    state.starfield.advance(rng);

    if !state.started {
        return;
    }

    if !state.game_over && !state.paused {
        step_running(state, rng);
    } else if state.game_over {
        step_game_over(state);
    }
}

fn apply_input<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    // Start/restart is only valid on the title screen or after game over
    if input.start && (!state.started || state.game_over) {
        state.started = true;
        state.reset_session(rng);
        log::info!("Session started (high score {})", state.high_score);
    }

    if input.toggle_pause {
        state.paused = !state.paused;
        log::debug!("Pause toggled: {}", state.paused);
    }

    if input.ascend && state.started && !state.game_over && !state.paused {
        state.craft.ascend();
    }
}

fn step_running<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.craft.integrate();

    // Spawn pacing: shrinking threshold, and never an empty screen
    state.spawn_counter += 1;
    if state.spawn_counter > spawn_threshold(state.score) || state.obstacles.is_empty() {
        let height = OBSTACLE_MIN_HEIGHT + rng.random_range(0..OBSTACLE_HEIGHT_SPREAD);
        let y = rng.random_range(0..VIEWPORT_HEIGHT as u32 - height);
        state.spawn_obstacle(y as f32, height as f32);
        state.spawn_counter = 0;
    }

    let craft_bounds = state.craft.bounds();

    // Outcomes resolve in obstacle order: speed follows the running score,
    // and exit is checked before collision so an obstacle resolves one way only
    state.obstacles.retain_mut(|obstacle| {
        obstacle.rect.pos.x -= obstacle_speed(state.score);
        if obstacle.rect.has_exited_left() {
            state.score += 1;
            state.events.push(GameEvent::Scored);
            false
        } else if obstacle.rect.intersects(&craft_bounds) {
            // Later hits in the tick of the last life cost nothing more
            if !state.game_over {
                state.lives = state.lives.saturating_sub(1);
                state.events.push(GameEvent::Hit);
                state.explosion.trigger(craft_bounds.pos);
                log::info!("Craft hit, {} lives left", state.lives);

                if state.lives == 0 {
                    state.game_over = true;
                    state.events.push(GameEvent::GameOver);
                    log::info!("Game over with score {}", state.score);
                }
            }
            false
        } else {
            true
        }
    });

    state.explosion.advance();
}

fn step_game_over(state: &mut GameState) {
    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
    }

    if state.game_over_alpha < 1.0 {
        state.game_over_alpha = (state.game_over_alpha + GAME_OVER_FADE_STEP).min(1.0);
    }
}

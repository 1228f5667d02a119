//! Cosmetic background animation: scrolling starfield and gradient phase
//!
//! Nothing here affects gameplay, but it still draws from the injected RNG so
//! a seeded run replays identically frame for frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A single background particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Leftward pixels per tick
    pub speed: f32,
}

impl Star {
    fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0..VIEWPORT_WIDTH as u32) as f32,
                rng.random_range(0..VIEWPORT_HEIGHT as u32) as f32,
            ),
            speed: random_star_speed(rng),
        }
    }
}

fn random_star_speed<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(STAR_MIN_SPEED..=STAR_MAX_SPEED) as f32
}

/// Fixed-size set of stars wrapping horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            stars: (0..STAR_COUNT).map(|_| Star::random(rng)).collect(),
        }
    }

    /// Scroll every star left; stars past the left edge respawn at the right
    /// edge with a fresh height and speed.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            star.pos.x -= star.speed;
            if star.pos.x < 0.0 {
                star.pos.x = VIEWPORT_WIDTH;
                star.pos.y = rng.random_range(0..VIEWPORT_HEIGHT as u32) as f32;
                star.speed = random_star_speed(rng);
            }
        }
    }
}

/// Phase driving the animated background color blend
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientPhase(pub f32);

impl GradientPhase {
    /// Advance one tick, wrapping after a full cycle
    pub fn advance(&mut self) {
        self.0 += GRADIENT_PHASE_STEP;
        if self.0 > std::f32::consts::TAU {
            self.0 -= std::f32::consts::TAU;
        }
    }

    /// Blend factor in [0, 1]
    pub fn blend(&self) -> f32 {
        0.5 + 0.5 * self.0.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starfield_has_fixed_size() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = Starfield::new(&mut rng);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for _ in 0..1000 {
            field.advance(&mut rng);
        }
        assert_eq!(field.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_star_respawns_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = Starfield {
            stars: vec![Star {
                pos: Vec2::new(1.0, 100.0),
                speed: 3.0,
            }],
        };
        field.advance(&mut rng);

        let star = field.stars[0];
        assert_eq!(star.pos.x, VIEWPORT_WIDTH);
        assert!(star.pos.y >= 0.0 && star.pos.y < VIEWPORT_HEIGHT);
        assert!(star.speed >= STAR_MIN_SPEED as f32 && star.speed <= STAR_MAX_SPEED as f32);
    }

    #[test]
    fn test_star_at_zero_does_not_respawn() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = Starfield {
            stars: vec![Star {
                pos: Vec2::new(2.0, 100.0),
                speed: 2.0,
            }],
        };
        field.advance(&mut rng);
        assert_eq!(field.stars[0].pos, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_gradient_phase_wraps() {
        let mut phase = GradientPhase(std::f32::consts::TAU - 0.005);
        phase.advance();
        assert!(phase.0 >= 0.0 && phase.0 < 0.01);
    }

    #[test]
    fn test_gradient_blend_range() {
        let mut phase = GradientPhase::default();
        for _ in 0..700 {
            let t = phase.blend();
            assert!((0.0..=1.0).contains(&t));
            phase.advance();
        }
    }
}

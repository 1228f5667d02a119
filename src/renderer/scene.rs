//! Frame composition: reads the game state and paints the pixel buffer
//!
//! The simulation works in an 800x600 logical viewport; everything is scaled
//! to whatever the terminal offers.

use std::io::{self, Write};

use glam::Vec2;

use super::font::{draw_text, draw_text_centered, text_height, text_width};
use super::pixels::{PixelBuf, Rgb};
use crate::assets::{GameAssets, Sprite};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, Rect};

// Background gradient endpoints, blended by the gradient phase
const TOP_A: Rgb = Rgb(10, 10, 30);
const TOP_B: Rgb = Rgb(30, 0, 60);
const BOTTOM_A: Rgb = Rgb(0, 0, 40);
const BOTTOM_B: Rgb = Rgb(0, 20, 60);

/// Logical star size
const STAR_SIZE: f32 = 2.0;
/// Explosion discs as (offset from impact point, diameter)
const EXPLOSION_OUTER: (f32, f32) = (-20.0, 80.0);
const EXPLOSION_INNER: (f32, f32) = (0.0, 40.0);
/// Sprite pixels below this alpha are transparent
const ALPHA_CUTOFF: u8 = 128;

pub struct Scene {
    buf: PixelBuf,
}

impl Scene {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            buf: PixelBuf::for_terminal(cols, rows),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
    }

    pub fn buffer(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        self.buf.render(out)
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.buf.width() as f32 / VIEWPORT_WIDTH,
            self.buf.height() as f32 / VIEWPORT_HEIGHT,
        )
    }

    fn to_px(&self, p: Vec2) -> (i32, i32) {
        let s = p * self.scale();
        (s.x.floor() as i32, s.y.floor() as i32)
    }

    /// Logical rect to pixel rect, never smaller than one pixel
    fn to_px_rect(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let (x, y) = self.to_px(rect.pos);
        let size = rect.size * self.scale();
        (x, y, (size.x.round() as i32).max(1), (size.y.round() as i32).max(1))
    }

    fn font_scale(&self) -> i32 {
        (self.buf.height() as i32 / 100).max(1)
    }

    /// Paint one frame. `fps` is shown when the settings ask for it.
    pub fn draw(&mut self, state: &GameState, assets: &GameAssets, settings: &Settings, fps: u32) {
        self.draw_background(state, settings);
        if settings.effective_starfield() {
            self.draw_stars(state);
        }
        self.draw_obstacles(state, assets.obstacle.as_ref());
        self.draw_craft(state, assets.craft.as_ref(), settings);
        if state.explosion.active && settings.effective_explosion() {
            self.draw_explosion(state.explosion.pos);
        }
        self.draw_hud(state, settings.show_fps.then_some(fps));
        self.draw_overlays(state);
    }

    fn draw_background(&mut self, state: &GameState, settings: &Settings) {
        let t = if settings.effective_gradient() {
            state.gradient.blend()
        } else {
            0.5
        };
        let top = Rgb::mix(TOP_A, TOP_B, t);
        let bottom = Rgb::mix(BOTTOM_A, BOTTOM_B, t);

        let h = self.buf.height();
        let w = self.buf.width() as i32;
        for y in 0..h {
            let v = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
            self.buf.fill_rect(0, y as i32, w, 1, Rgb::mix(top, bottom, v));
        }
    }

    fn draw_stars(&mut self, state: &GameState) {
        for star in &state.starfield.stars {
            let rect = Rect {
                pos: star.pos,
                size: Vec2::splat(STAR_SIZE),
            };
            let (x, y, w, h) = self.to_px_rect(&rect);
            self.buf.fill_rect(x, y, w, h, Rgb::WHITE);
        }
    }

    fn draw_obstacles(&mut self, state: &GameState, sprite: Option<&Sprite>) {
        for obstacle in &state.obstacles {
            let (x, y, w, h) = self.to_px_rect(&obstacle.rect);
            match sprite {
                Some(sprite) => self.blit(sprite, x, y, w, h, 0.0),
                None => self.buf.fill_rect(x, y, w, h, Rgb::RED),
            }
        }
    }

    fn draw_craft(&mut self, state: &GameState, sprite: Option<&Sprite>, settings: &Settings) {
        let (x, y, w, h) = self.to_px_rect(&state.craft.bounds());
        let angle = if settings.quality.rotate_craft() {
            state.craft.tilt_degrees().to_radians()
        } else {
            0.0
        };
        match sprite {
            Some(sprite) => self.blit(sprite, x, y, w, h, angle),
            None => self.fill_rotated(x, y, w, h, angle, Rgb::CYAN),
        }
    }

    /// Stretch `sprite` into the box, rotated by `angle` about its center
    fn blit(&mut self, sprite: &Sprite, x: i32, y: i32, w: i32, h: i32, angle: f32) {
        self.for_each_rotated(x, y, w, h, angle, |buf, px, py, u, v| {
            if let Some([r, g, b, a]) = sprite.sample(u, v) {
                if a >= ALPHA_CUTOFF {
                    buf.set(px, py, Rgb(r, g, b));
                }
            }
        });
    }

    fn fill_rotated(&mut self, x: i32, y: i32, w: i32, h: i32, angle: f32, c: Rgb) {
        self.for_each_rotated(x, y, w, h, angle, |buf, px, py, _, _| buf.set(px, py, c));
    }

    /// Visit every pixel covered by the rotated box with its normalized
    /// source coordinates. Positive angles turn clockwise on screen.
    fn for_each_rotated(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        angle: f32,
        mut f: impl FnMut(&mut PixelBuf, i32, i32, f32, f32),
    ) {
        let half = Vec2::new(w as f32, h as f32) / 2.0;
        let center = Vec2::new(x as f32, y as f32) + half;
        let (sin, cos) = angle.sin_cos();
        // Bounding radius covers every rotation
        let reach = half.length().ceil() as i32;

        for py in (center.y as i32 - reach)..=(center.y as i32 + reach) {
            for px in (center.x as i32 - reach)..=(center.x as i32 + reach) {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) + half;
                if local.x >= 0.0 && local.y >= 0.0 && local.x < w as f32 && local.y < h as f32 {
                    f(&mut self.buf, px, py, local.x / w as f32, local.y / h as f32);
                }
            }
        }
    }

    fn draw_explosion(&mut self, at: Vec2) {
        let discs = [(EXPLOSION_OUTER, Rgb::ORANGE), (EXPLOSION_INNER, Rgb::YELLOW)];
        for ((offset, size), color) in discs {
            let rect = Rect {
                pos: at + Vec2::splat(offset),
                size: Vec2::splat(size),
            };
            let (x, y, w, h) = self.to_px_rect(&rect);
            self.buf.fill_ellipse(x, y, w, h, color);
        }
    }

    fn draw_hud(&mut self, state: &GameState, fps: Option<u32>) {
        let s = self.font_scale();
        let line = text_height(s) + s;
        let lines = [
            (format!("Score: {}", state.score), Rgb::WHITE),
            (format!("High Score: {}", state.high_score), Rgb::YELLOW),
            (format!("Lives: {}", state.lives), Rgb::GREEN),
        ];
        for (i, (text, color)) in lines.iter().enumerate() {
            draw_text(&mut self.buf, s, s + i as i32 * line, text, *color, s, 1.0);
        }

        if let Some(fps) = fps {
            let text = format!("{} FPS", fps);
            let x = self.buf.width() as i32 - text_width(&text, s) - s;
            draw_text(&mut self.buf, x, s, &text, Rgb::WHITE, s, 1.0);
        }
    }

    /// Top row for text whose baseline sits at logical `y`
    fn baseline(&self, y: f32, scale: i32) -> i32 {
        self.to_px(Vec2::new(0.0, y)).1 - text_height(scale)
    }

    /// Double-size title when it fits, otherwise the HUD size
    fn title_scale(&self, text: &str) -> i32 {
        let s = self.font_scale() * 2;
        if text_width(text, s) <= self.buf.width() as i32 {
            s
        } else {
            self.font_scale()
        }
    }

    fn draw_overlays(&mut self, state: &GameState) {
        let s = self.font_scale();

        if state.paused {
            let big = self.title_scale("Paused");
            let y = self.baseline(300.0, big);
            draw_text_centered(&mut self.buf, y, "Paused", Rgb::ORANGE, big, 1.0);
        }

        if !state.started {
            let big = self.title_scale("Space Dodger");
            let y = self.baseline(220.0, big);
            draw_text_centered(&mut self.buf, y, "Space Dodger", Rgb::CYAN, big, 1.0);
            let y = self.baseline(300.0, s);
            draw_text_centered(&mut self.buf, y, "Press SPACE to Start", Rgb::WHITE, s, 1.0);
        }

        if state.game_over {
            let alpha = state.game_over_alpha.clamp(0.0, 1.0);
            let big = self.title_scale("Game Over!");
            let y = self.baseline(300.0, big);
            draw_text_centered(&mut self.buf, y, "Game Over!", Rgb::YELLOW, big, alpha);
            let y = self.baseline(350.0, s);
            draw_text_centered(&mut self.buf, y, "Press SPACE to restart", Rgb::WHITE, s, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::settings::QualityPreset;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        let mut rng = Pcg32::seed_from_u64(3);
        GameState::new(0, &mut rng)
    }

    fn plain_settings() -> Settings {
        Settings {
            reduced_motion: true,
            ..Settings::default()
        }
    }

    /// 80x60 pixels, so one pixel is 10x10 logical units
    fn scene() -> Scene {
        Scene::new(80, 30)
    }

    fn headless_assets() -> GameAssets {
        GameAssets::load(&NoAssets)
    }

    #[test]
    fn test_craft_fallback_is_cyan() {
        let mut state = state();
        state.started = true;
        let mut scene = scene();
        scene.draw(&state, &headless_assets(), &plain_settings(), 0);
        // Craft center at logical (120, 270)
        assert_eq!(scene.buffer().get(12, 27), Rgb::CYAN);
    }

    #[test]
    fn test_obstacle_fallback_is_red() {
        let mut state = state();
        state.started = true;
        state.spawn_obstacle(400.0, 100.0);
        state.obstacles[0].rect.pos.x = 500.0;
        let mut scene = scene();
        scene.draw(&state, &headless_assets(), &plain_settings(), 0);
        assert_eq!(scene.buffer().get(51, 45), Rgb::RED);
    }

    #[test]
    fn test_obstacle_sprite_is_used() {
        let mut state = state();
        state.started = true;
        state.spawn_obstacle(400.0, 100.0);
        state.obstacles[0].rect.pos.x = 500.0;
        let assets = GameAssets {
            obstacle: Some(Sprite {
                width: 1,
                height: 1,
                pixels: vec![[1, 2, 3, 255]],
            }),
            ..GameAssets::default()
        };
        let mut scene = scene();
        scene.draw(&state, &assets, &plain_settings(), 0);
        assert_eq!(scene.buffer().get(51, 45), Rgb(1, 2, 3));
    }

    #[test]
    fn test_background_without_motion_is_static() {
        let mut a = state();
        let mut b = state();
        a.gradient.0 = 0.0;
        b.gradient.0 = 1.5;
        let settings = plain_settings();

        let mut first = scene();
        first.draw(&a, &GameAssets::default(), &settings, 0);
        let mut second = scene();
        second.draw(&b, &GameAssets::default(), &settings, 0);
        // Bottom-right corner is far from any text or sprite
        assert_eq!(first.buffer().get(79, 59), second.buffer().get(79, 59));
    }

    #[test]
    fn test_gradient_follows_phase() {
        let mut a = state();
        let mut b = state();
        a.gradient.0 = -std::f32::consts::FRAC_PI_2;
        b.gradient.0 = std::f32::consts::FRAC_PI_2;
        let settings = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        // Low disables the animation too
        let mut first = scene();
        first.draw(&a, &GameAssets::default(), &settings, 0);
        let mut second = scene();
        second.draw(&b, &GameAssets::default(), &settings, 0);
        assert_eq!(first.buffer().get(79, 0), second.buffer().get(79, 0));

        let settings = Settings::from_preset(QualityPreset::High);
        a.starfield.stars.clear();
        b.starfield.stars.clear();
        first.draw(&a, &GameAssets::default(), &settings, 0);
        second.draw(&b, &GameAssets::default(), &settings, 0);
        assert_eq!(first.buffer().get(79, 0), TOP_A);
        assert_eq!(second.buffer().get(79, 0), TOP_B);
    }

    #[test]
    fn test_explosion_disc() {
        let mut state = state();
        state.started = true;
        state.explosion.trigger(Vec2::new(500.0, 300.0));
        let mut scene = scene();
        scene.draw(&state, &GameAssets::default(), &Settings::default(), 0);
        // Inner disc centered at logical (520, 320)
        assert_eq!(scene.buffer().get(52, 32), Rgb::YELLOW);
        // Outer ring only
        assert_eq!(scene.buffer().get(52, 29), Rgb::ORANGE);
    }

    #[test]
    fn test_game_over_text_fades_in() {
        let mut state = state();
        state.started = true;
        state.game_over = true;
        state.starfield.stars.clear();
        state.craft.y = 0.0;
        let settings = plain_settings();

        state.game_over_alpha = 0.0;
        let mut hidden = scene();
        hidden.draw(&state, &GameAssets::default(), &settings, 0);

        state.game_over_alpha = 1.0;
        let mut shown = scene();
        shown.draw(&state, &GameAssets::default(), &settings, 0);

        let region = || (20..40).flat_map(|y| (0..80).map(move |x| (x, y)));
        assert!(region().any(|(x, y)| hidden.buffer().get(x, y) != shown.buffer().get(x, y)));
        assert!(region().any(|(x, y)| shown.buffer().get(x, y) == Rgb::YELLOW));
    }
}

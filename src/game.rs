//! Session wiring around the simulation
//!
//! [`Game`] owns the state, the seeded RNG and the side-effect collaborators.
//! Input arrives as [`Action`]s between ticks; each [`Game::advance`] runs one
//! simulation tick and dispatches the events it produced.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::platform::Action;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Game<S: ScoreStore> {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    high_scores: HighScores<S>,
    audio: Option<AudioManager>,
    /// One-shot input collected since the last tick
    input: TickInput,
    quit_requested: bool,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(settings: &Settings, store: S, audio: Option<AudioManager>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let high_scores = HighScores::load(store);
        let state = GameState::new(high_scores.best(), &mut rng);
        log::info!("New game (seed {}, high score {})", seed, high_scores.best());

        Self {
            state,
            rng,
            seed,
            high_scores,
            audio,
            input: TickInput::default(),
            quit_requested: false,
        }
    }

    /// Queue an action for the next tick
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Ascend => self.input.ascend = true,
            // Two presses within one tick cancel out
            Action::TogglePause => self.input.toggle_pause = !self.input.toggle_pause,
            Action::Start => self.input.start = true,
            Action::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
        }
    }

    /// Run one tick and dispatch its side effects. Returns the events.
    pub fn advance(&mut self) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, &mut self.rng);

        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(*event);
        }
        events
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Scored => self.play(SoundEffect::Score),
            GameEvent::Hit => self.play(SoundEffect::Hit),
            GameEvent::GameOver => self.play(SoundEffect::GameOver),
            GameEvent::NewHighScore(score) => {
                self.high_scores.submit(score);
            }
        }
    }

    fn play(&self, effect: SoundEffect) {
        if let Some(audio) = &self.audio {
            audio.play(effect);
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn high_scores(&self) -> &HighScores<S> {
        &self.high_scores
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

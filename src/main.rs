//! Space Dodger entry point
//!
//! Sets up logging, loads settings and assets, then runs the fixed-timestep
//! game loop in the terminal.

use std::fs::File;
use std::io::{self, stdout};
use std::time::Instant;

use crossterm::event::{self, Event};
use crossterm::terminal;

use space_dodger::assets::{FsAssetLoader, GameAssets};
use space_dodger::audio::AudioManager;
use space_dodger::persistence::FileScoreStore;
use space_dodger::platform::{FrameClock, TerminalGuard, action_for_key};
use space_dodger::renderer::Scene;
use space_dodger::{Game, Settings};

/// Log destination; stderr would tear through the raw-mode screen
const LOG_FILE: &str = "space-dodger.log";

fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // No writable log file: keep quiet rather than corrupt the screen
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> io::Result<()> {
    init_logging();
    log::info!("Space Dodger starting...");

    let settings = Settings::load();
    let assets = GameAssets::load(&FsAssetLoader::new(&settings.asset_dir));
    let audio = AudioManager::new(&assets, &settings);
    let store = FileScoreStore::new(&settings.high_score_path);
    let mut game = Game::new(&settings, store, Some(audio));

    let result = run(&mut game, &assets, &settings);
    log::info!(
        "Exiting (seed {}, high score {})",
        game.seed(),
        game.high_scores().best()
    );
    result
}

fn run(
    game: &mut Game<FileScoreStore>,
    assets: &GameAssets,
    settings: &Settings,
) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut out = stdout();

    let (cols, rows) = terminal::size()?;
    let mut scene = Scene::new(cols, rows);
    let mut clock = FrameClock::new(Instant::now());

    loop {
        // Input: block until the next tick is due
        if event::poll(clock.until_next_tick())? {
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(action) = action_for_key(key) {
                            game.handle(action);
                        }
                    }
                    Event::Resize(c, r) => scene.resize(c, r),
                    _ => {}
                }
                if !event::poll(std::time::Duration::ZERO)? {
                    break;
                }
            }
        }
        if game.should_quit() {
            return Ok(());
        }

        // Update
        let now = Instant::now();
        let ticks = clock.ticks_due(now);
        for _ in 0..ticks {
            game.advance();
        }

        // Draw
        if ticks > 0 {
            scene.draw(game.state(), assets, settings, clock.fps());
            scene.render(&mut out)?;
            clock.record_frame(now);
        }
    }
}

//! Platform layer: terminal setup, key mapping and frame timing
//!
//! Everything crossterm-specific lives here so the simulation and the game
//! wiring stay testable without a terminal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use crate::consts::{MAX_SUBSTEPS, TICK};

/// Player intents recognised by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ascend,
    TogglePause,
    /// Start from the title screen or restart after game over
    Start,
    Quit,
}

/// Map a key event to an action. Repeats and releases are ignored.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Some(Action::Ascend)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::TogglePause),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Start),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Longest frame gap fed to the accumulator
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);
const FPS_WINDOW: usize = 60;

/// Fixed-timestep accumulator for the frame driver
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    accumulator: Duration,
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            accumulator: Duration::ZERO,
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Number of simulation ticks due at `now`, at most `MAX_SUBSTEPS`.
    /// Time beyond the cap is dropped so a stall never snowballs.
    pub fn ticks_due(&mut self, now: Instant) -> u32 {
        let dt = now.saturating_duration_since(self.last).min(MAX_FRAME_GAP);
        self.last = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= TICK && substeps < MAX_SUBSTEPS {
            self.accumulator -= TICK;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(TICK);
        }
        substeps
    }

    /// Time left until the next tick is due, used as the input poll timeout
    pub fn until_next_tick(&self) -> Duration {
        TICK.saturating_sub(self.accumulator)
    }

    /// Record a rendered frame for the FPS counter
    pub fn record_frame(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // The slot about to be overwritten is the oldest sample
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.saturating_duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Raw mode + alternate screen for the lifetime of the guard
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = out.flush();
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

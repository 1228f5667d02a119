//! Sound cues played through rodio
//!
//! Clips come from [`GameAssets`]; without an output device or a clip, playing
//! a cue does nothing.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::assets::{GameAssets, SoundClip};
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Obstacle scrolled past
    Score,
    /// Obstacle hit the craft
    Hit,
    /// Last life lost
    GameOver,
}

struct Output {
    // Dropping the stream stops playback
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Output>,
    score: Option<SoundClip>,
    hit: Option<SoundClip>,
    game_over: Option<SoundClip>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_output", &self.output.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    /// Open the default output device. Audio is disabled if that fails.
    pub fn new(assets: &GameAssets, settings: &Settings) -> Self {
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("No audio output ({}), sound disabled", e);
                None
            }
        };
        Self::build(output, assets, settings)
    }

    /// Manager that never opens a device
    pub fn silent(assets: &GameAssets, settings: &Settings) -> Self {
        Self::build(None, assets, settings)
    }

    fn build(output: Option<Output>, assets: &GameAssets, settings: &Settings) -> Self {
        let mut manager = Self {
            output,
            score: assets.score.clone(),
            hit: assets.hit.clone(),
            game_over: assets.game_over.clone(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn clip(&self, effect: SoundEffect) -> Option<&SoundClip> {
        match effect {
            SoundEffect::Score => self.score.as_ref(),
            SoundEffect::Hit => self.hit.as_ref(),
            SoundEffect::GameOver => self.game_over.as_ref(),
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let (Some(output), Some(clip)) = (&self.output, self.clip(effect)) else {
            return;
        };

        let source = match Decoder::new(Cursor::new(clip.0.clone())) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("Cannot decode {:?} sound: {}", effect, e);
                return;
            }
        };
        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                sink.set_volume(vol);
                sink.append(source);
                sink.detach();
            }
            Err(e) => log::warn!("Cannot play {:?} sound: {}", effect, e),
        }
    }
}

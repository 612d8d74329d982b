//! Sound cues
//!
//! The game decides *which* sound plays and how loud; the presentation layer
//! drains the queue and does the actual playback. Without a sound bank the
//! manager stays silent and gameplay is unaffected.

use std::collections::HashMap;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Balloon popped
    Pop,
    /// Level target reached
    LevelUp,
    /// Session ended
    GameOver,
    /// New best score on the board (optional clip)
    HighScore,
    /// Menu/button feedback
    Click,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Pop,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
        SoundEffect::Click,
    ];

    /// Clips an asset directory must provide for a usable bank
    pub const REQUIRED: [SoundEffect; 4] = [
        SoundEffect::Pop,
        SoundEffect::LevelUp,
        SoundEffect::GameOver,
        SoundEffect::Click,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// File name inside the asset directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Pop => "pop.wav",
            SoundEffect::LevelUp => "level_up.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::HighScore => "high_score.wav",
            SoundEffect::Click => "click.wav",
        }
    }

    /// Cue for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Popped { .. } => Some(SoundEffect::Pop),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NameAccepted
            | GameEvent::DifficultyChanged(_)
            | GameEvent::Started
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::ReturnedToMenu => Some(SoundEffect::Click),
            GameEvent::Escaped { .. } | GameEvent::NameRejected | GameEvent::QuitRequested => None,
        }
    }
}

/// Encoded clips keyed by effect
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: HashMap<SoundEffect, Vec<u8>>,
}

impl SoundBank {
    pub fn insert(&mut self, effect: SoundEffect, bytes: Vec<u8>) {
        self.clips.insert(effect, bytes);
    }

    pub fn clip(&self, effect: SoundEffect) -> Option<&[u8]> {
        self.clips.get(&effect).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// A queued playback request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRequest {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    bank: Option<SoundBank>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    pending: Vec<PlayRequest>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(bank: Option<SoundBank>) -> Self {
        if bank.is_none() {
            log::warn!("No sound bank loaded - audio disabled");
        }
        Self {
            bank,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pending: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings, bank: Option<SoundBank>) -> Self {
        let mut audio = Self::new(bank);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    pub fn is_enabled(&self) -> bool {
        self.bank.is_some()
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

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue a sound effect. Effects without a loaded clip are dropped.
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 || self.clip(effect).is_none() {
            return;
        }
        self.pending.push(PlayRequest { effect, volume });
    }

    /// Queue the cue for a simulation event
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Clip bytes for a request
    pub fn clip(&self, effect: SoundEffect) -> Option<&[u8]> {
        self.bank.as_ref().and_then(|bank| bank.clip(effect))
    }

    /// Drain queued requests
    pub fn take_pending(&mut self) -> Vec<PlayRequest> {
        std::mem::take(&mut self.pending)
    }
}

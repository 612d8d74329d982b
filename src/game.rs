//! Frame loop glue
//!
//! Owns the session state and its collaborators. Each frame: queued input is
//! fed to the fixed-step simulation, events fan out to audio, and the score
//! board is written when a session ends.

use glam::Vec2;

use crate::assets::{AssetLoader, Backdrop};
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Frame, GameEvent, GameState, InputEvent, Screen, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub scores: HighScores,
    pub audio: AudioManager,
    pub backdrop: Backdrop,
    accumulator_ms: u64,
    input: TickInput,
    quit_requested: bool,
}

impl Game {
    /// Build a game from settings, loading scores and assets from disk
    pub fn new(settings: &Settings) -> Self {
        let state = GameState::new(settings.resolve_seed(), settings.difficulty)
            .with_session_ms(settings.session_ms());
        let scores = HighScores::load(&settings.scores_path);

        let loader = AssetLoader::new(&settings.asset_dir);
        let backdrop = Backdrop::load(&loader);
        let bank = loader
            .load_sound_bank()
            .map_err(|e| log::warn!("{e}"))
            .ok();
        let audio = AudioManager::from_settings(settings, bank);

        Self::from_parts(state, scores, audio, backdrop)
    }

    pub fn from_parts(
        state: GameState,
        scores: HighScores,
        audio: AudioManager,
        backdrop: Backdrop,
    ) -> Self {
        Self {
            state,
            scores,
            audio,
            backdrop,
            accumulator_ms: 0,
            input: TickInput::default(),
            quit_requested: false,
        }
    }

    /// Queue an input event for the next simulation step
    pub fn push(&mut self, event: InputEvent) {
        self.input.events.push(event);
    }

    /// Let the demo player pop balloons
    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Pointer click in screen coordinates. Returns true if it landed on a balloon.
    ///
    /// Whether the pop counts is still decided by the simulation.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        match hit_test(&self.state, Vec2::new(x, y)) {
            Some(id) => {
                self.push(InputEvent::Pop(id));
                true
            }
            None => false,
        }
    }

    /// Run simulation steps for `frame_ms` of real time
    pub fn update(&mut self, frame_ms: u64) -> Vec<GameEvent> {
        self.accumulator_ms += frame_ms.min(SIM_DT_MS * MAX_SUBSTEPS as u64);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let step_events = tick(&mut self.state, &self.input, SIM_DT_MS);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.events.clear();

            for event in &step_events {
                self.handle_event(event);
            }
            events.extend(step_events);
        }
        events
    }

    fn handle_event(&mut self, event: &GameEvent) {
        self.audio.on_event(event);
        match *event {
            GameEvent::GameOver { skipped, .. } => {
                if !skipped {
                    self.record_result();
                }
            }
            GameEvent::QuitRequested => self.quit_requested = true,
            _ => {}
        }
    }

    /// Write the finished session to the score board. Failures are reported, never fatal.
    fn record_result(&mut self) {
        let was_best = self.state.score > 0 && self.scores.potential_rank(self.state.score) == 1;
        match self.scores.add_and_save(&self.state) {
            Ok(Some(rank)) => {
                log::info!(
                    "{} scored {} (rank {})",
                    self.state.player_name,
                    self.state.score,
                    rank
                );
                if was_best {
                    self.audio.play(SoundEffect::HighScore);
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("Could not save score: {e}"),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Snapshot for the presentation layer
    pub fn frame(&self) -> Frame {
        self.state.frame()
    }
}

/// Topmost live balloon under a point
pub fn hit_test(state: &GameState, point: Vec2) -> Option<u32> {
    state
        .balloons
        .iter()
        .rev()
        .find(|b| !b.popped && b.contains_point(point))
        .map(|b| b.id)
}

//! Balloon Pop - a timed balloon-popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloons, scoring, levels, session state)
//! - `highscores`: Persisted scoreboard
//! - `settings`: User configuration
//! - `assets`: Background art and sound bank loading
//! - `audio`: Sound cue queue fed by simulation events
//! - `game`: Frame-loop glue between input, simulation and persistence

pub mod assets;
pub mod audio;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::{HighScores, ScoreRecord};
pub use settings::Settings;

/// RGB color
pub type Color = [u8; 3];

/// Game configuration constants
pub mod consts {
    use crate::Color;

    /// Fixed simulation step in milliseconds (the classic 30 ms loop delay)
    pub const SIM_DT_MS: u64 = 30;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (pixels)
    pub const PLAY_WIDTH: f32 = 500.0;
    pub const PLAY_HEIGHT: f32 = 600.0;
    /// Header/HUD band at the top of the screen; balloons above this line can't be popped
    pub const HEADER_HEIGHT: f32 = 60.0;

    /// Balloon width range (height is width * BALLOON_ASPECT)
    pub const BALLOON_MIN_SIZE: f32 = 30.0;
    pub const BALLOON_MAX_SIZE: f32 = 50.0;
    pub const BALLOON_ASPECT: f32 = 4.0 / 3.0;
    /// Spawn line just below the visible bottom edge
    pub const SPAWN_Y: f32 = PLAY_HEIGHT + 10.0;

    /// Live balloon target = BASE_BALLOON_COUNT + level * BALLOONS_PER_LEVEL
    pub const BASE_BALLOON_COUNT: usize = 5;
    pub const BALLOONS_PER_LEVEL: usize = 2;

    /// Pops needed to clear level 1, and the increase applied at each level-up
    pub const INITIAL_LEVEL_TARGET: u32 = 10;
    pub const LEVEL_TARGET_STEP: u32 = 5;

    /// Default session length
    pub const SESSION_MS: u64 = 30_000;

    /// Longest accepted player name
    pub const MAX_NAME_LEN: usize = 15;

    /// Demo autoplayer pops one balloon this often
    pub const IDLE_POP_INTERVAL_TICKS: u64 = 12;

    /// Balloon colors
    pub const PALETTE: [Color; 6] = [
        [235, 64, 52],  // red
        [52, 152, 219], // blue
        [46, 204, 113], // green
        [241, 196, 15], // yellow
        [155, 89, 182], // purple
        [230, 126, 34], // orange
    ];

    /// Backdrop used when background art is unavailable
    pub const FALLBACK_BACKGROUND: Color = [173, 216, 230];
}

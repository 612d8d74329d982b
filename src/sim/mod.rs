//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (balloons kept in spawn order)
//! - No rendering, audio or file I/O

pub mod population;
pub mod scoring;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use population::{advance_balloons, replenish, target_population};
pub use scoring::{check_level_up, register_pop, target_remaining};
pub use session::SessionCommand;
pub use spawn::{create_balloon, speed_range};
pub use state::{
    Balloon, BalloonView, Difficulty, DifficultySetting, Frame, GameState, Screen, SessionClock,
};
pub use tick::{GameEvent, InputEvent, TickInput, tick};

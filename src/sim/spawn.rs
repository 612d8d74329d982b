//! Balloon factory
//!
//! Balloons are drawn from the session RNG so a seeded run replays exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Balloon, Difficulty};
use crate::consts::*;

/// Inclusive speed range for a difficulty at a given level.
///
/// Both bounds grow by `speed_increase_per_level` for every level, so the
/// range never moves down as the level rises.
pub fn speed_range(difficulty: Difficulty, level: u32) -> (f32, f32) {
    let setting = difficulty.setting();
    let bonus = level as f32 * setting.speed_increase_per_level;
    (setting.min_speed + bonus, setting.max_speed + bonus)
}

/// Create a balloon just below the bottom of the play area
pub fn create_balloon<R: Rng>(
    rng: &mut R,
    id: u32,
    difficulty: Difficulty,
    level: u32,
) -> Balloon {
    let size = rng.random_range(BALLOON_MIN_SIZE..=BALLOON_MAX_SIZE);
    let x = rng.random_range(0.0..=PLAY_WIDTH - size);
    let color = PALETTE[rng.random_range(0..PALETTE.len())];
    let (min_speed, max_speed) = speed_range(difficulty, level.max(1));
    let speed = rng.random_range(min_speed..=max_speed);

    Balloon {
        id,
        pos: Vec2::new(x, SPAWN_Y),
        size,
        color,
        speed,
        popped: false,
    }
}

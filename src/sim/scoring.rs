//! Scoring and level progression

use super::state::{GameState, Screen};
use crate::consts::LEVEL_TARGET_STEP;

/// Pop a balloon. Counts only while playing, for a live balloon below the header.
///
/// Returns whether the pop was accepted. Rejected pops change nothing.
pub fn register_pop(state: &mut GameState, balloon_id: u32) -> bool {
    if state.screen != Screen::Playing {
        return false;
    }
    let Some(balloon) = state.balloons.iter_mut().find(|b| b.id == balloon_id) else {
        return false;
    };
    if !balloon.is_poppable() {
        return false;
    }

    balloon.popped = true;
    state.score += 1;
    state.popped_count += 1;
    true
}

/// Advance a level once the pop target is reached.
///
/// Returns the new level. The reset of `popped_count` makes a second call in
/// the same tick a no-op.
pub fn check_level_up(state: &mut GameState) -> Option<u32> {
    if state.screen != Screen::Playing || state.popped_count < state.level_target {
        return None;
    }

    state.level += 1;
    state.level_target += LEVEL_TARGET_STEP;
    state.popped_count = 0;
    log::info!(
        "Level {} reached (next target: {} pops)",
        state.level,
        state.level_target
    );
    Some(state.level)
}

/// Pops still needed to clear the current level
pub fn target_remaining(state: &GameState) -> u32 {
    state.level_target.saturating_sub(state.popped_count)
}

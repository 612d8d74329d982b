//! Live balloon population: movement, removal and replenishment

use super::spawn::create_balloon;
use super::state::GameState;
use crate::consts::*;

/// Live balloon target for a level
#[inline]
pub fn target_population(level: u32) -> usize {
    BASE_BALLOON_COUNT + level as usize * BALLOONS_PER_LEVEL
}

/// Move every unpopped balloon up by its own speed, then drop escaped and popped balloons.
///
/// Returns the ids of balloons that escaped off the top. Does nothing while paused.
pub fn advance_balloons(state: &mut GameState) -> Vec<u32> {
    if state.is_paused() {
        return Vec::new();
    }

    for balloon in state.balloons.iter_mut().filter(|b| !b.popped) {
        balloon.pos.y -= balloon.speed;
    }

    let escaped: Vec<u32> = state
        .balloons
        .iter()
        .filter(|b| !b.popped && b.has_escaped())
        .map(|b| b.id)
        .collect();
    if !escaped.is_empty() {
        log::debug!("{} balloon(s) escaped", escaped.len());
    }

    state.balloons.retain(|b| !b.popped && !b.has_escaped());
    escaped
}

/// Spawn balloons until the live count reaches the target for the current level.
///
/// Returns how many were spawned.
pub fn replenish(state: &mut GameState) -> usize {
    if state.is_paused() {
        return 0;
    }

    let target = target_population(state.level);
    let mut spawned = 0;
    while state.balloons.len() < target {
        let id = state.next_entity_id();
        let (difficulty, level) = (state.difficulty, state.level);
        let balloon = create_balloon(state.rng_mut(), id, difficulty, level);
        state.balloons.push(balloon);
        spawned += 1;
    }
    spawned
}

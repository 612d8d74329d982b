//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::population::{advance_balloons, replenish};
use super::scoring::{check_level_up, register_pop};
use super::session;
use super::state::{Difficulty, GameState, Screen};
use crate::consts::{IDLE_POP_INTERVAL_TICKS, PLAY_HEIGHT};

/// A discrete input, already mapped from device events by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Click landed on this balloon (hit test done by the caller)
    Pop(u32),
    /// Character typed into the name field
    Char(char),
    Backspace,
    SubmitName,
    SelectDifficulty(Difficulty),
    Start,
    Pause,
    Skip,
    PlayAgain,
    MainMenu,
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
    /// Idle/demo mode - the sim pops balloons on its own
    pub idle_mode: bool,
}

/// Things that happened during a tick, for audio, persistence and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Popped { id: u32, score: u64 },
    Escaped { id: u32 },
    LevelUp { level: u32 },
    NameAccepted,
    NameRejected,
    DifficultyChanged(Difficulty),
    Started,
    Paused,
    Resumed,
    GameOver { score: u64, level: u32, skipped: bool },
    ReturnedToMenu,
    QuitRequested,
}

/// Advance the game state by one step of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &event in &input.events {
        handle_input(state, event, &mut events);
    }

    if state.screen != Screen::Playing {
        return events;
    }

    state.time_ticks += 1;

    if input.idle_mode && state.time_ticks.is_multiple_of(IDLE_POP_INTERVAL_TICKS) {
        idle_pop(state, &mut events);
    }

    if session::advance_clock(state, dt_ms) {
        events.push(game_over_event(state));
        return events;
    }

    for id in advance_balloons(state) {
        events.push(GameEvent::Escaped { id });
    }

    // Spawns use this tick's level; a level-up applies from the next tick
    replenish(state);
    if let Some(level) = check_level_up(state) {
        events.push(GameEvent::LevelUp { level });
    }

    events
}

fn handle_input(state: &mut GameState, event: InputEvent, events: &mut Vec<GameEvent>) {
    match event {
        InputEvent::Pop(id) => {
            if register_pop(state, id) {
                events.push(GameEvent::Popped {
                    id,
                    score: state.score,
                });
            }
        }
        InputEvent::Char(c) => {
            session::push_name_char(state, c);
        }
        InputEvent::Backspace => {
            session::pop_name_char(state);
        }
        InputEvent::SubmitName => {
            if state.screen == Screen::NameInput {
                events.push(if session::submit_name(state) {
                    GameEvent::NameAccepted
                } else {
                    GameEvent::NameRejected
                });
            }
        }
        InputEvent::SelectDifficulty(difficulty) => {
            if session::select_difficulty(state, difficulty) {
                events.push(GameEvent::DifficultyChanged(difficulty));
            }
        }
        InputEvent::Start => {
            if session::start(state) {
                events.push(GameEvent::Started);
            }
        }
        InputEvent::Pause => match session::toggle_pause(state) {
            Some(Screen::Paused) => events.push(GameEvent::Paused),
            Some(Screen::Playing) => events.push(GameEvent::Resumed),
            _ => {}
        },
        InputEvent::Skip => {
            if session::skip(state) {
                events.push(game_over_event(state));
            }
        }
        InputEvent::PlayAgain => {
            if session::play_again(state) {
                events.push(GameEvent::Started);
            }
        }
        InputEvent::MainMenu => {
            if session::main_menu(state) {
                events.push(GameEvent::ReturnedToMenu);
            }
        }
        InputEvent::Quit => events.push(GameEvent::QuitRequested),
    }
}

/// Demo player: pop the on-screen balloon closest to the header
fn idle_pop(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let target = state
        .balloons
        .iter()
        .filter(|b| b.is_poppable() && b.pos.y < PLAY_HEIGHT)
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.id);

    if let Some(id) = target {
        if register_pop(state, id) {
            events.push(GameEvent::Popped {
                id,
                score: state.score,
            });
        }
    }
}

fn game_over_event(state: &GameState) -> GameEvent {
    GameEvent::GameOver {
        score: state.score,
        level: state.level,
        skipped: state.skipped,
    }
}

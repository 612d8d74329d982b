//! Session state machine and clock
//!
//! ```text
//! NameInput -> Menu -> Playing <-> Paused
//!                        |           |
//!                        +-> GameOver <+
//!              Menu <- GameOver -> Playing
//! ```

use rand::Rng;

use super::state::{Difficulty, GameState, Screen};
use crate::consts::MAX_NAME_LEN;

/// Commands that move the session between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    SubmitName,
    Start,
    Pause,
    Skip,
    TimeUp,
    PlayAgain,
    MainMenu,
}

impl Screen {
    /// Transition table. `None` means the command is not accepted on this screen.
    pub fn transition(self, command: SessionCommand) -> Option<Screen> {
        use SessionCommand::*;
        match (self, command) {
            (Screen::NameInput, SubmitName) => Some(Screen::Menu),
            (Screen::Menu, Start) => Some(Screen::Playing),
            (Screen::Playing, Pause) => Some(Screen::Paused),
            (Screen::Paused, Pause) => Some(Screen::Playing),
            (Screen::Playing | Screen::Paused, Skip) => Some(Screen::GameOver),
            (Screen::Playing, TimeUp) => Some(Screen::GameOver),
            (Screen::GameOver, PlayAgain) => Some(Screen::Playing),
            (Screen::GameOver, MainMenu) => Some(Screen::Menu),
            _ => None,
        }
    }
}

/// Apply a command if the table allows it
fn apply(state: &mut GameState, command: SessionCommand) -> Option<Screen> {
    let next = state.screen.transition(command)?;
    log::debug!("{:?} --{:?}--> {:?}", state.screen, command, next);
    state.screen = next;
    Some(next)
}

/// Name entry accepts ASCII letters and digits, up to the length cap
pub fn push_name_char(state: &mut GameState, c: char) -> bool {
    if state.screen != Screen::NameInput
        || !c.is_ascii_alphanumeric()
        || state.name_buffer.chars().count() >= MAX_NAME_LEN
    {
        return false;
    }
    state.name_buffer.push(c);
    true
}

pub fn pop_name_char(state: &mut GameState) -> bool {
    state.screen == Screen::NameInput && state.name_buffer.pop().is_some()
}

/// Submit the typed name. Blank names are rejected and the player stays on name entry.
pub fn submit_name(state: &mut GameState) -> bool {
    if state.screen != Screen::NameInput {
        return false;
    }
    let name = state.name_buffer.trim();
    if name.is_empty() {
        log::debug!("Rejected empty player name");
        return false;
    }

    state.player_name = name.to_string();
    state.player_id = uuid::Builder::from_random_bytes(state.rng_mut().random())
        .into_uuid()
        .to_string();
    apply(state, SessionCommand::SubmitName);
    log::info!("Player '{}' signed in", state.player_name);
    true
}

/// Difficulty can only be changed from the menu
pub fn select_difficulty(state: &mut GameState, difficulty: Difficulty) -> bool {
    if state.screen != Screen::Menu {
        return false;
    }
    state.difficulty = difficulty;
    log::info!("Difficulty set to {}", difficulty.as_str());
    true
}

/// Menu -> Playing with a fresh session and clock
pub fn start(state: &mut GameState) -> bool {
    if state.screen.transition(SessionCommand::Start).is_none() {
        return false;
    }
    state.reset_session();
    apply(state, SessionCommand::Start);
    log::info!(
        "Session started ({}, {} s)",
        state.difficulty.as_str(),
        state.clock.total_ms / 1000
    );
    true
}

/// Playing <-> Paused. Returns the new screen.
pub fn toggle_pause(state: &mut GameState) -> Option<Screen> {
    apply(state, SessionCommand::Pause)
}

/// End the session immediately; the result is not recorded
pub fn skip(state: &mut GameState) -> bool {
    if apply(state, SessionCommand::Skip).is_none() {
        return false;
    }
    state.skipped = true;
    log::info!("Session skipped at score {}", state.score);
    true
}

/// Run the session clock while playing. Returns true when this call ended the session.
pub fn advance_clock(state: &mut GameState, dt_ms: u64) -> bool {
    if state.screen != Screen::Playing {
        return false;
    }
    state.clock.advance(dt_ms);
    if !state.clock.expired() {
        return false;
    }
    apply(state, SessionCommand::TimeUp);
    log::info!(
        "Time up: score {}, level {}",
        state.score,
        state.level
    );
    true
}

/// GameOver -> Playing with a fresh session
pub fn play_again(state: &mut GameState) -> bool {
    if apply(state, SessionCommand::PlayAgain).is_none() {
        return false;
    }
    state.reset_session();
    true
}

/// GameOver -> Menu with a fresh session
pub fn main_menu(state: &mut GameState) -> bool {
    if apply(state, SessionCommand::MainMenu).is_none() {
        return false;
    }
    state.reset_session();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn signed_in() -> GameState {
        let mut state = GameState::new(1, Difficulty::Medium);
        for c in "Ada".chars() {
            assert!(push_name_char(&mut state, c));
        }
        assert!(submit_name(&mut state));
        state
    }

    #[test]
    fn test_transition_table() {
        use SessionCommand::*;
        assert_eq!(Screen::NameInput.transition(SubmitName), Some(Screen::Menu));
        assert_eq!(Screen::NameInput.transition(Start), None);
        assert_eq!(Screen::Menu.transition(Pause), None);
        assert_eq!(Screen::Playing.transition(TimeUp), Some(Screen::GameOver));
        assert_eq!(Screen::Paused.transition(TimeUp), None);
        assert_eq!(Screen::Paused.transition(Skip), Some(Screen::GameOver));
        assert_eq!(Screen::GameOver.transition(Pause), None);
        assert_eq!(Screen::GameOver.transition(MainMenu), Some(Screen::Menu));
    }

    #[test]
    fn test_name_entry_policy() {
        let mut state = GameState::new(1, Difficulty::Medium);
        assert!(!submit_name(&mut state));
        assert!(!push_name_char(&mut state, ' '));
        assert!(!push_name_char(&mut state, '!'));
        assert!(!submit_name(&mut state));
        assert_eq!(state.screen, Screen::NameInput);

        for c in "abcdefghijklmnopqrst".chars() {
            push_name_char(&mut state, c);
        }
        assert_eq!(state.name_buffer.len(), MAX_NAME_LEN);
        assert!(pop_name_char(&mut state));
        assert_eq!(state.name_buffer, "abcdefghijklmn");

        assert!(submit_name(&mut state));
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.player_name, "abcdefghijklmn");
        assert!(!state.player_id.is_empty());
    }

    #[test]
    fn test_player_id_follows_seed() {
        let first = signed_in();
        let second = signed_in();
        assert_eq!(first.player_id, second.player_id);
        assert_eq!(first.player_id.parse::<uuid::Uuid>().unwrap().get_version_num(), 4);

        let mut other = GameState::new(2, Difficulty::Medium);
        push_name_char(&mut other, 'A');
        submit_name(&mut other);
        assert_ne!(other.player_id, first.player_id);
    }

    #[test]
    fn test_difficulty_only_in_menu() {
        let mut state = GameState::new(1, Difficulty::Medium);
        assert!(!select_difficulty(&mut state, Difficulty::Hard));
        let mut state = signed_in();
        assert!(select_difficulty(&mut state, Difficulty::Hard));
        assert_eq!(state.difficulty, Difficulty::Hard);
        // Selecting a difficulty does not start the clock
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.clock.elapsed_ms, 0);
        start(&mut state);
        assert!(!select_difficulty(&mut state, Difficulty::Easy));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut state = signed_in();
        assert!(start(&mut state));
        advance_clock(&mut state, 1_000);
        assert_eq!(toggle_pause(&mut state), Some(Screen::Paused));
        assert!(!advance_clock(&mut state, 60_000));
        assert_eq!(state.clock.elapsed_ms, 1_000);
        assert_eq!(toggle_pause(&mut state), Some(Screen::Playing));
    }

    #[test]
    fn test_time_up_ends_session() {
        let mut state = signed_in();
        start(&mut state);
        state.clock.elapsed_ms = SESSION_MS;
        assert!(advance_clock(&mut state, SIM_DT_MS));
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.clock.time_left_secs(), 0);
        assert!(!state.skipped);
    }

    #[test]
    fn test_skip_sets_flag_and_restart_clears_it() {
        let mut state = signed_in();
        start(&mut state);
        state.score = 12;
        assert!(skip(&mut state));
        assert!(state.skipped);
        assert_eq!(state.screen, Screen::GameOver);

        assert!(play_again(&mut state));
        assert_eq!(state.screen, Screen::Playing);
        assert!(!state.skipped);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_main_menu_resets() {
        let mut state = signed_in();
        start(&mut state);
        state.score = 3;
        state.level = 2;
        assert!(!main_menu(&mut state));
        advance_clock(&mut state, SESSION_MS);
        assert!(main_menu(&mut state));
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        // Player identity survives the reset
        assert_eq!(state.player_name, "Ada");
    }
}

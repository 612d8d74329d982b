//! Game state and core simulation types
//!
//! One `GameState` per session, owned by the frame loop and passed explicitly
//! to every simulation operation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::*;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Speed parameters of a difficulty preset (pixels per tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySetting {
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_increase_per_level: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn setting(&self) -> DifficultySetting {
        match self {
            Difficulty::Easy => DifficultySetting {
                min_speed: 1.0,
                max_speed: 3.0,
                speed_increase_per_level: 0.5,
            },
            Difficulty::Medium => DifficultySetting {
                min_speed: 2.0,
                max_speed: 5.0,
                speed_increase_per_level: 1.0,
            },
            Difficulty::Hard => DifficultySetting {
                min_speed: 3.0,
                max_speed: 7.0,
                speed_increase_per_level: 1.5,
            },
        }
    }
}

/// Session screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Waiting for the player to type a name
    NameInput,
    /// Difficulty selection, waiting for Start
    Menu,
    /// Active gameplay, clock running
    Playing,
    /// Gameplay frozen, clock stopped
    Paused,
    /// Session ended (time up or skipped)
    GameOver,
}

/// A rising balloon
#[derive(Debug, Clone, PartialEq)]
pub struct Balloon {
    pub id: u32,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    /// Bounding box width
    pub size: f32,
    pub color: Color,
    /// Upward movement per tick
    pub speed: f32,
    pub popped: bool,
}

impl Balloon {
    #[inline]
    pub fn height(&self) -> f32 {
        self.size * BALLOON_ASPECT
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    /// Bottom edge has risen past the top of the screen
    pub fn has_escaped(&self) -> bool {
        self.bottom() < 0.0
    }

    /// Below the header band and not yet popped
    pub fn is_poppable(&self) -> bool {
        !self.popped && self.pos.y > HEADER_HEIGHT
    }

    /// Ellipse containment test against the bounding box
    pub fn contains_point(&self, point: Vec2) -> bool {
        let radii = Vec2::new(self.size / 2.0, self.height() / 2.0);
        let center = self.pos + radii;
        let d = (point - center) / radii;
        d.length_squared() <= 1.0
    }
}

/// Elapsed vs. allotted session time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    pub elapsed_ms: u64,
    pub total_ms: u64,
}

impl SessionClock {
    pub fn new(total_ms: u64) -> Self {
        Self {
            elapsed_ms: 0,
            total_ms,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }

    pub fn expired(&self) -> bool {
        self.elapsed_ms >= self.total_ms
    }

    pub fn time_left_ms(&self) -> u64 {
        self.total_ms.saturating_sub(self.elapsed_ms)
    }

    /// Whole seconds remaining, floored
    pub fn time_left_secs(&self) -> u64 {
        self.time_left_ms() / 1000
    }
}

/// Render-facing view of a balloon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub screen: Screen,
    pub player_name: String,
    pub name_buffer: String,
    pub difficulty: Difficulty,
    pub score: u64,
    pub time_left_secs: u64,
    pub level: u32,
    pub target_remaining: u32,
    pub balloons: Vec<BalloonView>,
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub screen: Screen,
    /// Live balloons in spawn order
    pub balloons: Vec<Balloon>,
    /// Pops counted toward the current level target
    pub popped_count: u32,
    /// Current level (starts at 1)
    pub level: u32,
    /// Pops needed to clear the current level
    pub level_target: u32,
    pub score: u64,
    /// Session ended via Skip; suppresses the score write
    pub skipped: bool,
    pub player_id: String,
    pub player_name: String,
    /// Name being typed on the NameInput screen
    pub name_buffer: String,
    pub difficulty: Difficulty,
    pub clock: SessionClock,
    /// Simulation ticks spent in Playing this session
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, starting at name entry
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::NameInput,
            balloons: Vec::new(),
            popped_count: 0,
            level: 1,
            level_target: INITIAL_LEVEL_TARGET,
            score: 0,
            skipped: false,
            player_id: String::new(),
            player_name: String::new(),
            name_buffer: String::new(),
            difficulty,
            clock: SessionClock::new(SESSION_MS),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Override the allotted session length
    pub fn with_session_ms(mut self, total_ms: u64) -> Self {
        self.clock = SessionClock::new(total_ms);
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_paused(&self) -> bool {
        self.screen == Screen::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.screen == Screen::GameOver
    }

    pub fn balloon(&self, id: u32) -> Option<&Balloon> {
        self.balloons.iter().find(|b| b.id == id)
    }

    /// Clear per-session progress: score, level, balloons, target, pops, skip flag and clock
    pub fn reset_session(&mut self) {
        self.balloons.clear();
        self.popped_count = 0;
        self.level = 1;
        self.level_target = INITIAL_LEVEL_TARGET;
        self.score = 0;
        self.skipped = false;
        self.clock.reset();
        self.time_ticks = 0;
    }

    pub fn frame(&self) -> Frame {
        Frame {
            screen: self.screen,
            player_name: self.player_name.clone(),
            name_buffer: self.name_buffer.clone(),
            difficulty: self.difficulty,
            score: self.score,
            time_left_secs: self.clock.time_left_secs(),
            level: self.level,
            target_remaining: self.level_target.saturating_sub(self.popped_count),
            balloons: self
                .balloons
                .iter()
                .filter(|b| !b.popped)
                .map(|b| BalloonView {
                    pos: b.pos,
                    size: b.size,
                    color: b.color,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balloon_at(x: f32, y: f32) -> Balloon {
        Balloon {
            id: 1,
            pos: Vec2::new(x, y),
            size: 30.0,
            color: PALETTE[0],
            speed: 3.0,
            popped: false,
        }
    }

    #[test]
    fn test_difficulty_table() {
        let medium = Difficulty::Medium.setting();
        assert_eq!(medium.min_speed, 2.0);
        assert_eq!(medium.max_speed, 5.0);
        assert_eq!(medium.speed_increase_per_level, 1.0);
        for d in Difficulty::ALL {
            let s = d.setting();
            assert!(s.min_speed <= s.max_speed);
            assert!(s.speed_increase_per_level >= 0.0);
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("impossible"), None);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }

    #[test]
    fn test_balloon_geometry() {
        let b = balloon_at(100.0, 200.0);
        assert!((b.height() - 40.0).abs() < 1e-4);
        assert!((b.bottom() - 240.0).abs() < 1e-4);
        assert!(b.contains_point(Vec2::new(115.0, 220.0)));
        // Bounding box corner is outside the ellipse
        assert!(!b.contains_point(Vec2::new(100.5, 200.5)));
        assert!(b.is_poppable());
        assert!(!b.has_escaped());

        let high = balloon_at(100.0, HEADER_HEIGHT - 1.0);
        assert!(!high.is_poppable());
        let gone = balloon_at(100.0, -41.0);
        assert!(gone.has_escaped());
    }

    #[test]
    fn test_clock_floors_and_clamps() {
        let mut clock = SessionClock::new(30_000);
        assert_eq!(clock.time_left_secs(), 30);
        clock.advance(1_500);
        assert_eq!(clock.time_left_secs(), 28);
        clock.advance(40_000);
        assert!(clock.expired());
        assert_eq!(clock.time_left_secs(), 0);
        clock.reset();
        assert!(!clock.expired());
    }

    #[test]
    fn test_reset_session() {
        let mut state = GameState::new(7, Difficulty::Hard);
        state.score = 42;
        state.level = 4;
        state.level_target = 25;
        state.popped_count = 3;
        state.skipped = true;
        state.clock.advance(10_000);
        state.balloons.push(balloon_at(0.0, 300.0));

        state.reset_session();
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.level_target, INITIAL_LEVEL_TARGET);
        assert_eq!(state.popped_count, 0);
        assert!(!state.skipped);
        assert!(state.balloons.is_empty());
        assert_eq!(state.clock.elapsed_ms, 0);
        // Difficulty is a menu choice, not session progress
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_frame_hides_popped_balloons() {
        let mut state = GameState::new(1, Difficulty::Medium);
        let mut popped = balloon_at(10.0, 300.0);
        popped.popped = true;
        state.balloons.push(popped);
        state.balloons.push(balloon_at(50.0, 300.0));
        state.popped_count = 4;

        let frame = state.frame();
        assert_eq!(frame.balloons.len(), 1);
        assert_eq!(frame.balloons[0].pos.x, 50.0);
        assert_eq!(frame.target_remaining, INITIAL_LEVEL_TARGET - 4);
        assert_eq!(frame.time_left_secs, 30);
    }
}

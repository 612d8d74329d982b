//! Balloon Pop entry point
//!
//! Runs one headless session in real time with the demo player, then prints
//! the score board. A graphical front end drives `Game` the same way.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use balloon_pop::consts::SIM_DT_MS;
use balloon_pop::sim::{GameEvent, InputEvent, Screen};
use balloon_pop::{Game, Settings};

const DEMO_PLAYER: &str = "Autoplay";
const SCOREBOARD_ROWS: usize = 10;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Balloon Pop (headless) starting...");

    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);
    if !settings_path.exists() {
        settings
            .save(&settings_path)
            .with_context(|| format!("writing default settings to {}", settings_path.display()))?;
    }
    let mut game = Game::new(&settings);

    for c in DEMO_PLAYER.chars() {
        game.push(InputEvent::Char(c));
    }
    game.push(InputEvent::SubmitName);
    game.push(InputEvent::SelectDifficulty(settings.difficulty));
    game.push(InputEvent::Start);
    game.set_idle(true);

    let frame_budget = Duration::from_millis(SIM_DT_MS);
    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let frame_ms = now.duration_since(last).as_millis() as u64;
        last = now;

        for event in game.update(frame_ms) {
            match event {
                GameEvent::LevelUp { level } => log::info!("Level {level}!"),
                GameEvent::GameOver { .. } => game.push(InputEvent::Quit),
                _ => {}
            }
        }
        // Playback belongs to a front end; drop the cues here
        game.audio.take_pending();

        if game.should_quit() {
            break;
        }

        let frame = game.frame();
        if frame.screen == Screen::Playing {
            log::debug!(
                "score {} | level {} | {} s left | {} to go",
                frame.score,
                frame.level,
                frame.time_left_secs,
                frame.target_remaining
            );
        }

        if let Some(rest) = frame_budget.checked_sub(now.elapsed()) {
            thread::sleep(rest);
        }
    }

    let frame = game.frame();
    println!(
        "\nFinal score: {} (level {}, {})",
        frame.score,
        frame.level,
        frame.difficulty.as_str()
    );
    println!("\n{:>4}  {:<15}  {:>6}  {:>5}  {:<6}  {}", "#", "Name", "Score", "Level", "Mode", "When");
    for (i, record) in game.scores.top(SCOREBOARD_ROWS).iter().enumerate() {
        println!(
            "{:>4}  {:<15}  {:>6}  {:>5}  {:<6}  {}",
            i + 1,
            record.name,
            record.score,
            record.level,
            record.difficulty.as_str(),
            record.timestamp
        );
    }

    Ok(())
}

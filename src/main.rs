//! Headless demo session
//!
//! Runs the simulation for a minute of game time with a trivial autopilot
//! and canned commentary, logging milestones as they happen. Useful as a
//! smoke test and as a minimal integration example for the library.

use std::time::{SystemTime, UNIX_EPOCH};

use neon_breaker::commentary::{CommentaryBridge, CommentaryEvent, Commentator};
use neon_breaker::consts::SIM_DT;
use neon_breaker::sim::{GamePhase, GameStats, Playfield};
use neon_breaker::{Session, Tuning};

/// Offline stand-in for a real text generator
struct CannedCommentator;

impl Commentator for CannedCommentator {
    fn generate(&self, event: CommentaryEvent, stats: GameStats) -> anyhow::Result<String> {
        let line = match event {
            CommentaryEvent::Start => "Neon grid online. Break something.".to_string(),
            CommentaryEvent::Retry => {
                format!("Level {} resets. The bricks are laughing.", stats.level)
            }
            CommentaryEvent::Victory => {
                format!("Level cleared at {} points. Acceptable.", stats.score)
            }
            CommentaryEvent::GameOver => {
                format!("Logging off with {} points. Bold choice.", stats.score)
            }
        };
        Ok(line)
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5eed);
    log::info!("headless demo, seed {seed}");

    let bridge = CommentaryBridge::new(Box::new(CannedCommentator));
    let mut session = Session::new(
        seed,
        Playfield::new(800.0, 600.0),
        Tuning::default(),
        Some(bridge),
    );
    session.start();

    let mut last_comment = session.comment().to_string();
    for _ in 0..3600 {
        // Autopilot: chase the lowest ball and keep mashing launch
        let scene = session.scene();
        let target = scene
            .balls
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x);
        if let Some(x) = target {
            session.pointer_moved(x);
        }
        session.activate();
        session.advance(SIM_DT);

        if session.comment() != last_comment {
            last_comment = session.comment().to_string();
            log::info!("commentary: {last_comment}");
        }
    }

    session.quit();
    // Give the game-over line a moment to come back from the worker
    for _ in 0..100 {
        std::thread::sleep(std::time::Duration::from_millis(1));
        session.advance(0.0);
        if session.comment() != last_comment {
            break;
        }
    }

    let state = session.state();
    debug_assert_eq!(state.phase, GamePhase::GameOver);
    println!(
        "final score {} at level {} after {} ticks",
        state.stats.score, state.stats.level, state.time_ticks
    );
    println!("last commentary: {}", session.comment());
}

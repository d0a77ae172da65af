//! Bridge to an external flavor-text generator
//!
//! The simulation fires discrete milestone events; an integrator-supplied
//! generator turns them into one-liners on a worker thread. The bridge is
//! strictly fire-and-forget: requests never block the frame loop, results
//! only ever become display text, and any failure degrades to a canned line.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::sim::GameStats;

/// A gameplay milestone worth commenting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryEvent {
    Start,
    Retry,
    Victory,
    GameOver,
}

impl CommentaryEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentaryEvent::Start => "START",
            CommentaryEvent::Retry => "RETRY",
            CommentaryEvent::Victory => "VICTORY",
            CommentaryEvent::GameOver => "GAME_OVER",
        }
    }
}

/// Shown when the generator errors out mid-request
pub const FALLBACK_COMMENT: &str = "System Error... Speech synthesis failed.";
/// Shown when no generator is configured at all
pub const OFFLINE_COMMENT: &str =
    "AI Module Offline: commentary disabled. Game is still playable.";

/// Persona instruction a generator should send along with every prompt
pub const SYSTEM_PERSONA: &str = "You are NEO, a sentient arcade machine spirit. \
    You are witty, slightly glitchy, and love neon aesthetics. \
    Keep responses under 20 words.";

/// Build the generation prompt for a milestone
pub fn prompt_for(event: CommentaryEvent, stats: GameStats) -> String {
    match event {
        CommentaryEvent::Start => {
            "Give a short, hyped-up, 1-sentence arcade opening line to start the game. \
             Cyberpunk style."
                .to_string()
        }
        CommentaryEvent::Retry => format!(
            "The player lost the ball and is restarting level {}. Give a short, \
             encouraging but slightly teasing 1-sentence comment about trying again.",
            stats.level
        ),
        CommentaryEvent::Victory => format!(
            "The player cleared level {}! Score: {}. Give a short, admiring but cool \
             1-sentence congratulation.",
            stats.level, stats.score
        ),
        CommentaryEvent::GameOver => format!(
            "The player decided to quit. They scored {} points. Give a short, \
             sarcastic, 1-sentence comment.",
            stats.score
        ),
    }
}

/// The pluggable text generator. Implementations may block (network calls
/// included); they run on the bridge's worker thread, never on the frame loop.
pub trait Commentator: Send {
    fn generate(&self, event: CommentaryEvent, stats: GameStats) -> anyhow::Result<String>;
}

/// Fire-and-forget worker around a [`Commentator`]
pub struct CommentaryBridge {
    requests: Sender<(CommentaryEvent, GameStats)>,
    replies: Receiver<String>,
}

impl CommentaryBridge {
    pub fn new(generator: Box<dyn Commentator>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(CommentaryEvent, GameStats)>();
        let (reply_tx, reply_rx) = mpsc::channel();
        thread::spawn(move || {
            for (event, stats) in request_rx {
                let line = generator.generate(event, stats).unwrap_or_else(|e| {
                    log::warn!("commentary generator failed for {}: {e:#}", event.as_str());
                    FALLBACK_COMMENT.to_string()
                });
                if reply_tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            requests: request_tx,
            replies: reply_rx,
        }
    }

    /// Queue a request; never blocks. If the worker is gone the request is
    /// dropped silently, which the caller treats as "no new commentary".
    pub fn request(&self, event: CommentaryEvent, stats: GameStats) {
        if self.requests.send((event, stats)).is_err() {
            log::warn!("commentary worker gone, dropping {} request", event.as_str());
        }
    }

    /// The newest finished line, if any. Older unread lines are discarded.
    pub fn poll(&self) -> Option<String> {
        let mut latest = None;
        while let Ok(line) = self.replies.try_recv() {
            latest = Some(line);
        }
        latest
    }
}

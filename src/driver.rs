//! Frame driver
//!
//! Turns wall-clock frame callbacks into fixed simulation ticks and shuttles
//! milestone events out to the commentary bridge. The simulation never waits
//! on the bridge; commentary is eventually-consistent display text and
//! nothing more.

use crate::commentary::{CommentaryBridge, CommentaryEvent, OFFLINE_COMMENT};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    self, GameEvent, GamePhase, GameState, GameStats, Playfield, Scene, TickInput,
};
use crate::tuning::Tuning;

/// One running game: state, pending input, and the commentary hookup
pub struct Session {
    state: GameState,
    input: TickInput,
    accumulator: f32,
    bridge: Option<CommentaryBridge>,
    comment: String,
}

impl Session {
    /// A fresh session in the menu phase. Without a bridge the commentary
    /// line is the canned offline notice and every request is a no-op.
    pub fn new(
        seed: u64,
        playfield: Playfield,
        tuning: Tuning,
        bridge: Option<CommentaryBridge>,
    ) -> Self {
        let comment = if bridge.is_some() {
            "Waiting for player input...".to_string()
        } else {
            OFFLINE_COMMENT.to_string()
        };
        Self {
            state: GameState::new(seed, playfield, tuning),
            input: TickInput::default(),
            accumulator: 0.0,
            bridge,
            comment,
        }
    }

    /// Continuous pointer updates; only the paddle's x target is touched,
    /// and the next tick reads it atomically relative to its own pass.
    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_x = Some(x);
    }

    /// Discrete activate action: launches any stuck balls on the next tick
    pub fn activate(&mut self) {
        self.input.launch = true;
    }

    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Menu {
            return;
        }
        self.state.phase = GamePhase::Playing;
        log::info!("game started at level {}", self.state.stats.level);
        let stats = self.state.stats;
        self.request(CommentaryEvent::Start, stats);
    }

    /// External quit: Playing -> GameOver. The simulation itself never
    /// ends a run; ball loss only retries the level.
    pub fn quit(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        log::info!(
            "run ended by quit: score {} level {}",
            self.state.stats.score,
            self.state.stats.level
        );
        let stats = self.state.stats;
        self.request(CommentaryEvent::GameOver, stats);
    }

    /// Back to the menu: stats reset to (0, 1), level 1 regenerated
    pub fn reset_to_menu(&mut self) {
        self.state.stats = GameStats::default();
        sim::generate_level(&mut self.state, 1);
        self.state.phase = GamePhase::Menu;
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    /// Advance by a wall-clock delta, running whole fixed ticks. Safe to
    /// call with synthetic deltas from tests; a stalled frame is capped so
    /// the accumulator cannot spiral.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;
            // One-shot inputs apply to exactly one tick
            self.input.launch = false;
        }

        self.dispatch_events();
        if let Some(bridge) = &self.bridge {
            if let Some(line) = bridge.poll() {
                self.comment = line;
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.take_events() {
            match event {
                GameEvent::LevelFailed(stats) => {
                    log::info!("level {} failed, retrying", stats.level);
                    self.request(CommentaryEvent::Retry, stats);
                }
                GameEvent::LevelCleared(stats) => {
                    log::info!("level cleared, advancing to {}", stats.level);
                    self.request(CommentaryEvent::Victory, stats);
                }
            }
        }
    }

    fn request(&self, event: CommentaryEvent, stats: GameStats) {
        if let Some(bridge) = &self.bridge {
            bridge.request(event, stats);
        }
    }

    /// Latest commentary line for the HUD
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Snapshot of everything a renderer needs this frame
    pub fn scene(&self) -> Scene {
        Scene::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}

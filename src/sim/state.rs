//! Game state and core simulation types
//!
//! All entities are plain mutable records owned exclusively by [`GameState`];
//! nothing is shared or referenced from more than one collection.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::level;
use super::powerup::{EffectTimer, PowerUp};
use crate::consts::*;
use crate::tuning::Tuning;

/// Packed 0xRRGGBB display color
pub type Color = u32;

pub const BALL_COLOR: Color = 0xffffff;
pub const PADDLE_COLOR: Color = 0x22d3ee;
/// Paddle tint while the sticky effect is active
pub const STICKY_PADDLE_COLOR: Color = 0xd946ef;
pub const SHIELD_COLOR: Color = 0x3b82f6;

/// Current phase of gameplay; only `Playing` runs physics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Attract screen; level 1 is laid out behind the overlay
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by an external quit action
    GameOver,
}

/// Ball motion state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    /// Adhered to the paddle at a fixed x offset from its left edge,
    /// awaiting a launch action
    Stuck { offset: f32 },
    /// Free-moving
    Free,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar launch/return speed, kept separate from `vel` so sticky
    /// releases and multiball clones know how fast to go
    pub speed: f32,
    pub state: BallState,
}

impl Ball {
    pub fn is_stuck(&self) -> bool {
        matches!(self.state, BallState::Stuck { .. })
    }

    /// Reposition an adhered ball to ride on the paddle
    pub fn update_stuck(&mut self, paddle: &Paddle) {
        if let BallState::Stuck { offset } = self.state {
            self.pos = Vec2::new(paddle.pos.x + offset, paddle.pos.y - self.radius);
        }
    }

    /// Adhere to the paddle at the current contact point
    pub fn stick_to(&mut self, paddle: &Paddle) {
        self.state = BallState::Stuck {
            offset: self.pos.x - paddle.pos.x,
        };
        self.vel = Vec2::ZERO;
    }

    /// Release an adhered ball straight up at its stored speed, with the
    /// given horizontal component. No-op for a free ball.
    pub fn release(&mut self, horizontal: f32) {
        if self.is_stuck() {
            self.state = BallState::Free;
            self.vel = Vec2::new(horizontal, -self.speed.abs());
        }
    }
}

/// The player's paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Unboosted width recorded at level generation; Expand reverts to this
    pub original_width: f32,
    pub sticky: bool,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            width: 0.0,
            height: PADDLE_HEIGHT,
            original_width: 0.0,
            sticky: false,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Move the paddle so its center tracks the pointer, clamped to the field
    pub fn track(&mut self, pointer_x: f32, field_width: f32) {
        let x = pointer_x - self.width / 2.0;
        self.pos.x = x.clamp(0.0, (field_width - self.width).max(0.0));
    }
}

/// A brick. Immutable once placed except for the one-shot visibility flip.
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
    pub color: Color,
    pub value: u32,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            width: self.width,
            height: self.height,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A cosmetic particle; never affects gameplay
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, decays to 0
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

/// Cumulative score and current level; monotonic within a playthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub score: u64,
    pub level: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

/// Milestone emitted by the tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// All balls lost; the same level was regenerated in place
    LevelFailed(GameStats),
    /// All bricks cleared; the next level was generated
    LevelCleared(GameStats),
}

/// Playfield dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Degenerate or non-finite dimensions are clamped up to the minimum
    /// rather than poisoning the geometry downstream.
    pub fn new(width: f32, height: f32) -> Self {
        let mut w = width;
        let mut h = height;
        if !w.is_finite() || w < MIN_PLAYFIELD_WIDTH {
            log::warn!("playfield width {width} clamped to {MIN_PLAYFIELD_WIDTH}");
            w = MIN_PLAYFIELD_WIDTH;
        }
        if !h.is_finite() || h < MIN_PLAYFIELD_HEIGHT {
            log::warn!("playfield height {height} clamped to {MIN_PLAYFIELD_HEIGHT}");
            h = MIN_PLAYFIELD_HEIGHT;
        }
        Self { width: w, height: h }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub stats: GameStats,
    /// Simulation tick counter; effect timers are deadlines on this clock
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Single-use bottom-boundary save; cleared on first consumption
    pub shield: bool,
    /// Pending timed-effect expirations; cancelled wholesale on level
    /// regeneration so a reset never trips a stale revert
    pub effect_timers: Vec<EffectTimer>,
    /// Outbox of milestones for the driver; never blocks the tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh state in the menu phase with level 1 laid out behind it
    pub fn new(seed: u64, playfield: Playfield, tuning: Tuning) -> Self {
        let mut state = Self {
            playfield,
            tuning,
            phase: GamePhase::Menu,
            stats: GameStats::default(),
            time_ticks: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            shield: false,
            effect_timers: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        level::generate_level(&mut state, 1);
        state
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Emit a cosmetic burst of particles at `at`
    pub fn spawn_burst(&mut self, at: Vec2, color: Color) {
        for _ in 0..PARTICLES_PER_BURST {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 4.0,
                (self.rng.random::<f32>() - 0.5) * 4.0,
            );
            let size = self.rng.random::<f32>() * 3.0 + 1.0;
            self.particles.push(Particle {
                pos: at,
                vel,
                life: 1.0,
                color,
                size,
            });
        }
        let cap = self.tuning.max_particles;
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(0..excess);
        }
    }

    /// Drain the milestone outbox
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn visible_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }
}

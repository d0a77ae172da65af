//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, timers, or platform dependencies

pub mod collision;
pub mod level;
pub mod powerup;
pub mod scene;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use level::generate_level;
pub use powerup::{EffectTimer, PowerUp, PowerUpKind, TimedEffect};
pub use scene::Scene;
pub use state::{
    Ball, BallState, Brick, Color, GameEvent, GamePhase, GameState, GameStats, Paddle, Particle,
    Playfield,
};
pub use tick::{TickInput, tick};

//! Neon Breaker - a single-screen neon brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, levels, power-ups)
//! - `driver`: Frame driver turning wall-clock time into fixed ticks
//! - `commentary`: Fire-and-forget bridge to an external flavor-text generator
//! - `tuning`: Data-driven game balance

pub mod commentary;
pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks consumed per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Brick grid dimensions (every catalogued layout uses this grid)
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 8;
    /// Horizontal margin on each side of the brick field
    pub const BRICK_FIELD_MARGIN: f32 = 20.0;
    /// Top of the brick field
    pub const BRICK_FIELD_TOP: f32 = 60.0;
    /// Grid cell height; the brick itself is the cell minus the gap
    pub const BRICK_CELL_HEIGHT: f32 = 25.0;
    pub const BRICK_GAP: f32 = 4.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance from the bottom bound up to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Smaller ball used on narrow playfields
    pub const BALL_RADIUS_NARROW: f32 = 6.0;
    /// Playfields narrower than this get the smaller ball
    pub const NARROW_PLAYFIELD_WIDTH: f32 = 500.0;

    /// Height of the shield band along the bottom bound
    pub const SHIELD_HEIGHT: f32 = 10.0;

    /// Side length of a falling power-up capsule
    pub const POWERUP_SIZE: f32 = 20.0;

    /// Particles emitted per cosmetic burst
    pub const PARTICLES_PER_BURST: usize = 8;
    /// Particle life lost per tick (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Minimum playfield dimensions; degenerate sizes are clamped up
    pub const MIN_PLAYFIELD_WIDTH: f32 = 160.0;
    pub const MIN_PLAYFIELD_HEIGHT: f32 = 120.0;
}

//! Procedural level generation
//!
//! A fixed catalogue of layouts cycles forever; difficulty past the first
//! lap comes from ball speed, not new geometry. Generation is structurally
//! idempotent: the same level number and playfield always produce the same
//! brick field.

use glam::Vec2;

use super::state::{Ball, BallState, Brick, Color, GameState, Paddle};
use crate::consts::*;

/// Boolean brick grids, row-major, top row first (1 = brick in the cell)
const LEVEL_LAYOUTS: [[[u8; BRICK_COLS]; BRICK_ROWS]; 5] = [
    // Standard
    [
        [1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    // Checkerboard
    [
        [1, 0, 1, 0, 1, 0, 1, 0],
        [0, 1, 0, 1, 0, 1, 0, 1],
        [1, 0, 1, 0, 1, 0, 1, 0],
        [0, 1, 0, 1, 0, 1, 0, 1],
        [1, 0, 1, 0, 1, 0, 1, 0],
    ],
    // Pyramid
    [
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 1, 1, 1, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 0],
        [1, 1, 1, 1, 1, 1, 1, 1],
        [1, 0, 0, 0, 0, 0, 0, 1],
    ],
    // The Tunnel
    [
        [1, 1, 0, 0, 0, 0, 1, 1],
        [1, 1, 0, 0, 0, 0, 1, 1],
        [1, 1, 0, 0, 0, 0, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1],
    ],
    // Invaders
    [
        [0, 1, 0, 0, 0, 0, 1, 0],
        [0, 0, 1, 0, 0, 1, 0, 0],
        [0, 1, 1, 1, 1, 1, 1, 0],
        [1, 1, 0, 1, 1, 0, 1, 1],
        [1, 1, 1, 1, 1, 1, 1, 1],
    ],
];

/// Brick palette, indexed by `(row + level) % len` so colors shift each level
pub const BRICK_PALETTE: [Color; 5] = [
    0xf43f5e, // rose
    0xa855f7, // purple
    0x3b82f6, // blue
    0x10b981, // emerald
    0xf59e0b, // amber
];

/// Layout for a 1-based level number; the catalogue repeats cyclically
pub fn layout_for(level: u32) -> &'static [[u8; BRICK_COLS]; BRICK_ROWS] {
    &LEVEL_LAYOUTS[(level as usize).saturating_sub(1) % LEVEL_LAYOUTS.len()]
}

/// Rebuild the brick field, ball, and paddle for `level`, clearing every
/// per-level transient (power-ups, particles, effect timers, shield).
/// `GameStats` is the only thing that survives a level transition.
pub fn generate_level(state: &mut GameState, level: u32) {
    let w = state.playfield.width;
    let h = state.playfield.height;

    let cell_w = (w - 2.0 * BRICK_FIELD_MARGIN) / BRICK_COLS as f32;
    let layout = layout_for(level);

    state.bricks.clear();
    for (r, row) in layout.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            if cell == 1 {
                state.bricks.push(Brick {
                    pos: Vec2::new(
                        BRICK_FIELD_MARGIN + c as f32 * cell_w,
                        BRICK_FIELD_TOP + r as f32 * BRICK_CELL_HEIGHT,
                    ),
                    width: cell_w - BRICK_GAP,
                    height: BRICK_CELL_HEIGHT - BRICK_GAP,
                    visible: true,
                    color: BRICK_PALETTE[(r + level as usize) % BRICK_PALETTE.len()],
                    // Rows nearer the top are worth more
                    value: (BRICK_ROWS - r) as u32 * 10,
                });
            }
        }
    }

    let paddle_width = w * state.tuning.paddle_width_fraction;
    state.paddle = Paddle {
        pos: Vec2::new((w - paddle_width) / 2.0, h - PADDLE_BOTTOM_OFFSET),
        width: paddle_width,
        height: PADDLE_HEIGHT,
        original_width: paddle_width,
        sticky: false,
    };

    let radius = if w < NARROW_PLAYFIELD_WIDTH {
        BALL_RADIUS_NARROW
    } else {
        BALL_RADIUS
    };
    let mut ball = Ball {
        pos: Vec2::ZERO,
        vel: Vec2::ZERO,
        radius,
        speed: state.tuning.ball_speed_for_level(level),
        state: BallState::Stuck {
            offset: paddle_width / 2.0,
        },
    };
    ball.update_stuck(&state.paddle);
    state.balls.clear();
    state.balls.push(ball);

    state.powerups.clear();
    state.particles.clear();
    state.effect_timers.clear();
    state.shield = false;

    log::debug!("level {level} generated: {} bricks", state.bricks.len());
}

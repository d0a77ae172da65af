//! Per-tick render snapshot
//!
//! Everything a renderer needs to draw one frame, copied out of the live
//! state so the drawing side never holds references into the simulation.

use glam::Vec2;

use super::powerup::PowerUpKind;
use super::state::{
    BALL_COLOR, Color, GamePhase, GameState, PADDLE_COLOR, STICKY_PADDLE_COLOR,
};

#[derive(Debug, Clone)]
pub struct BallSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct PaddleSprite {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub sticky: bool,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct BrickSprite {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct PowerUpSprite {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
    pub color: Color,
    /// One-letter label drawn on the capsule
    pub glyph: char,
}

#[derive(Debug, Clone)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    /// Remaining life, used directly as draw opacity
    pub alpha: f32,
}

/// A complete drawable frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub balls: Vec<BallSprite>,
    pub paddle: PaddleSprite,
    pub bricks: Vec<BrickSprite>,
    pub powerups: Vec<PowerUpSprite>,
    pub particles: Vec<ParticleSprite>,
    pub shield_active: bool,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.stats.score,
            level: state.stats.level,
            balls: state
                .balls
                .iter()
                .map(|b| BallSprite {
                    pos: b.pos,
                    radius: b.radius,
                    color: BALL_COLOR,
                })
                .collect(),
            paddle: PaddleSprite {
                pos: state.paddle.pos,
                width: state.paddle.width,
                height: state.paddle.height,
                sticky: state.paddle.sticky,
                color: if state.paddle.sticky {
                    STICKY_PADDLE_COLOR
                } else {
                    PADDLE_COLOR
                },
            },
            bricks: state
                .bricks
                .iter()
                .filter(|b| b.visible)
                .map(|b| BrickSprite {
                    pos: b.pos,
                    width: b.width,
                    height: b.height,
                    color: b.color,
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpSprite {
                    pos: p.pos,
                    size: p.size,
                    kind: p.kind,
                    color: p.kind.color(),
                    glyph: p.kind.glyph(),
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    alpha: p.life.clamp(0.0, 1.0),
                })
                .collect(),
            shield_active: state.shield,
        }
    }
}

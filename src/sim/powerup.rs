//! Power-up pickups and timed effect lifecycles
//!
//! Pickups spawn probabilistically where bricks die and fall until collected
//! or lost. Timed effects (Expand, Sticky) revert through deadlines on the
//! simulation clock rather than wall-clock timers, so a level reset cancels
//! them cleanly instead of leaving a stale revert armed.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::state::{Ball, BallState, Color, GameState};
use crate::consts::POWERUP_SIZE;

/// The closed set of power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Paddle width x1.5 for the effect duration
    Expand,
    /// Paddle catches balls for the effect duration
    Sticky,
    /// One-shot bottom-boundary save
    Shield,
    /// Two clones per active ball, immediately
    Multiball,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Expand,
        PowerUpKind::Sticky,
        PowerUpKind::Shield,
        PowerUpKind::Multiball,
    ];

    /// Display color; exhaustive so a new variant forces an update here
    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Expand => 0x22c55e,
            PowerUpKind::Sticky => 0xd946ef,
            PowerUpKind::Shield => 0x3b82f6,
            PowerUpKind::Multiball => 0xf59e0b,
        }
    }

    /// One-letter glyph drawn on the falling capsule
    pub fn glyph(self) -> char {
        match self {
            PowerUpKind::Expand => 'W',
            PowerUpKind::Sticky => 'G',
            PowerUpKind::Shield => 'S',
            PowerUpKind::Multiball => 'M',
        }
    }
}

/// A falling pickup; `pos` is the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            width: self.size,
            height: self.size,
        }
    }
}

/// Effects that revert on a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedEffect {
    Expand,
    Sticky,
}

/// A pending expiry on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTimer {
    pub effect: TimedEffect,
    pub expires_at: u64,
}

/// Roll the drop chance for a destroyed brick; on success spawn exactly one
/// pickup of a uniformly random kind, centered on `at.x`.
pub fn roll_drop(state: &mut GameState, at: Vec2) {
    if state.rng.random::<f32>() > state.tuning.drop_chance {
        return;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(at.x - POWERUP_SIZE / 2.0, at.y),
        size: POWERUP_SIZE,
    });
    log::debug!("power-up {kind:?} dropped at {at}");
}

/// Apply a collected power-up to the game state
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("power-up {kind:?} collected");
    match kind {
        PowerUpKind::Expand => {
            state.paddle.width = state.paddle.original_width * state.tuning.expand_factor;
            push_timer(state, TimedEffect::Expand);
        }
        PowerUpKind::Sticky => {
            state.paddle.sticky = true;
            push_timer(state, TimedEffect::Sticky);
        }
        PowerUpKind::Shield => {
            state.shield = true;
        }
        PowerUpKind::Multiball => {
            let sources: Vec<(Vec2, f32, f32)> = state
                .balls
                .iter()
                .map(|b| (b.pos, b.radius, b.speed))
                .collect();
            for (pos, radius, speed) in sources {
                for _ in 0..2 {
                    let dx = (state.rng.random::<f32>() - 0.5) * speed * 2.0;
                    state.balls.push(Ball {
                        pos,
                        vel: Vec2::new(dx, -speed.abs()),
                        radius,
                        speed,
                        state: BallState::Free,
                    });
                }
            }
        }
    }
}

fn push_timer(state: &mut GameState, effect: TimedEffect) {
    let expires_at = state.time_ticks + state.tuning.effect_duration_ticks;
    state.effect_timers.push(EffectTimer { effect, expires_at });
}

/// Fire every due expiry. Reverts are idempotent, so stacked pickups of the
/// same kind simply revert on the earliest deadline and no-op on the rest.
pub fn expire_due(state: &mut GameState) {
    let now = state.time_ticks;
    let mut due = Vec::new();
    state.effect_timers.retain(|timer| {
        if timer.expires_at <= now {
            due.push(timer.effect);
            false
        } else {
            true
        }
    });
    for effect in due {
        match effect {
            TimedEffect::Expand => {
                state.paddle.width = state.paddle.original_width;
            }
            TimedEffect::Sticky => {
                state.paddle.sticky = false;
                // Any adhered ball launches straight up at its stored speed
                for ball in &mut state.balls {
                    ball.release(0.0);
                }
            }
        }
    }
}

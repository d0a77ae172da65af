//! Data-driven game balance
//!
//! Every knob a designer might want to adjust without touching simulation
//! code. Defaults reproduce the original arcade feel; integrators can load
//! partial overrides from JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Scalar ball speed at level 0 (pixels per tick); each level adds
    /// `ball_speed_per_level` on top
    pub ball_speed_base: f32,
    pub ball_speed_per_level: f32,
    /// Paddle width as a fraction of playfield width
    pub paddle_width_fraction: f32,
    /// Scalar speed multiplier applied on each successful paddle return
    /// (unbounded growth is the difficulty curve, not a bug)
    pub paddle_return_boost: f32,
    /// Horizontal steering: vel.x gained per pixel of offset from the
    /// paddle center at the moment of the bounce
    pub steer_factor: f32,
    /// Expanded paddle width as a multiple of the original width
    pub expand_factor: f32,
    /// Power-up drop probability per destroyed brick
    pub drop_chance: f32,
    /// Timed effect duration in ticks (600 = 10 seconds at 60 Hz)
    pub effect_duration_ticks: u64,
    /// Power-up fall speed (pixels per tick)
    pub powerup_fall_speed: f32,
    /// Cosmetic particle cap; oldest particles are dropped first
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_speed_base: 5.0,
            ball_speed_per_level: 0.5,
            paddle_width_fraction: 0.15,
            paddle_return_boost: 1.01,
            steer_factor: 0.15,
            expand_factor: 1.5,
            drop_chance: 0.15,
            effect_duration_ticks: 600,
            powerup_fall_speed: 2.0,
            max_particles: 256,
        }
    }
}

impl Tuning {
    /// Parse a tuning table from JSON. Missing fields keep their defaults;
    /// unparsable input falls back to the full default table.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("invalid tuning JSON, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Scalar speed of a fresh ball for the given 1-based level
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_speed_base + level as f32 * self.ball_speed_per_level
    }
}

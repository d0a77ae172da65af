//! Axis-aligned collision predicates
//!
//! Every hit test here is a simplified point-vs-rect or rect-vs-rect check,
//! not a true circle-vs-rect sweep. A fast ball can tunnel through thin
//! geometry in a single tick; that is accepted arcade behavior.

use glam::Vec2;

/// Axis-aligned rectangle; `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Strict interior test (edges do not count)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.width
            && point.y > self.pos.y
            && point.y < self.pos.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.width
            && self.pos.x + self.width > other.pos.x
            && self.pos.y < other.pos.y + other.height
            && self.pos.y + self.height > other.pos.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Paddle catch test: the ball's center against the paddle rectangle
/// extended one ball radius vertically. Horizontal extent is exact.
pub fn ball_meets_paddle(ball_pos: Vec2, ball_radius: f32, paddle: &Rect) -> bool {
    ball_pos.y + ball_radius >= paddle.pos.y
        && ball_pos.y - ball_radius <= paddle.pos.y + paddle.height
        && ball_pos.x >= paddle.pos.x
        && ball_pos.x <= paddle.pos.x + paddle.width
}

/// Horizontal velocity imparted by a paddle return, proportional to the
/// contact offset from the paddle center. This is the steering mechanic.
pub fn steer(ball_x: f32, paddle: &Rect, factor: f32) -> f32 {
    (ball_x - (paddle.pos.x + paddle.width / 2.0)) * factor
}

/// Reflect off the side and top bounds, clamping the position back inside
/// horizontally. Returns true if any bound was hit.
pub fn bounce_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, field_width: f32) -> bool {
    let mut hit = false;
    if pos.x + radius > field_width || pos.x - radius < 0.0 {
        vel.x = -vel.x;
        pos.x = pos.x.clamp(radius, field_width - radius);
        hit = true;
    }
    if pos.y - radius < 0.0 {
        vel.y = -vel.y;
        hit = true;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn contains_is_strict() {
        let rect = Rect {
            pos: Vec2::new(10.0, 20.0),
            width: 30.0,
            height: 40.0,
        };
        assert!(rect.contains(Vec2::new(25.0, 40.0)));
        assert!(!rect.contains(Vec2::new(10.0, 40.0)));
        assert!(!rect.contains(Vec2::new(25.0, 60.0)));
        assert!(!rect.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn intersects_detects_overlap_and_separation() {
        let a = Rect {
            pos: Vec2::ZERO,
            width: 20.0,
            height: 20.0,
        };
        let b = Rect {
            pos: Vec2::new(15.0, 15.0),
            width: 20.0,
            height: 20.0,
        };
        let c = Rect {
            pos: Vec2::new(21.0, 0.0),
            width: 5.0,
            height: 5.0,
        };
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn paddle_band_extends_one_radius_vertically() {
        let paddle = Rect {
            pos: Vec2::new(100.0, 570.0),
            width: 120.0,
            height: 15.0,
        };
        // Center one radius above the paddle top still counts
        assert!(ball_meets_paddle(Vec2::new(160.0, 562.0), 8.0, &paddle));
        // Just beyond the band does not
        assert!(!ball_meets_paddle(Vec2::new(160.0, 561.0), 8.0, &paddle));
        // Horizontal extent is exact, no radius slack
        assert!(!ball_meets_paddle(Vec2::new(99.0, 575.0), 8.0, &paddle));
        assert!(ball_meets_paddle(Vec2::new(100.0, 575.0), 8.0, &paddle));
    }

    #[test]
    fn steering_is_proportional_to_offset() {
        let paddle = Rect {
            pos: Vec2::new(100.0, 570.0),
            width: 100.0,
            height: 15.0,
        };
        assert_eq!(steer(150.0, &paddle, 0.15), 0.0);
        assert_eq!(steer(190.0, &paddle, 0.15), 6.0);
        assert_eq!(steer(110.0, &paddle, 0.15), -6.0);
    }

    #[test]
    fn side_wall_reflects_and_clamps() {
        let mut pos = Vec2::new(795.0, 300.0);
        let mut vel = Vec2::new(4.0, 2.0);
        assert!(bounce_walls(&mut pos, &mut vel, 8.0, 800.0));
        assert_eq!(vel, Vec2::new(-4.0, 2.0));
        assert_eq!(pos.x, 792.0);
    }

    #[test]
    fn top_wall_reflects_without_clamp() {
        let mut pos = Vec2::new(400.0, 5.0);
        let mut vel = Vec2::new(1.0, -3.0);
        assert!(bounce_walls(&mut pos, &mut vel, 8.0, 800.0));
        assert_eq!(vel, Vec2::new(1.0, 3.0));
        assert_eq!(pos.y, 5.0);
    }

    #[test]
    fn interior_ball_is_untouched() {
        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(3.0, -3.0);
        assert!(!bounce_walls(&mut pos, &mut vel, 8.0, 800.0));
        assert_eq!(pos, Vec2::new(400.0, 300.0));
        assert_eq!(vel, Vec2::new(3.0, -3.0));
    }

    proptest! {
        #[test]
        fn walls_always_leave_ball_inside_horizontally(
            x in -200.0f32..1000.0,
            y in 1.0f32..700.0,
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
        ) {
            let mut pos = Vec2::new(x, y);
            let mut vel = Vec2::new(vx, vy);
            bounce_walls(&mut pos, &mut vel, 8.0, 800.0);
            prop_assert!(pos.x >= 8.0);
            prop_assert!(pos.x <= 792.0);
        }
    }
}

//! Collision detection and response
//!
//! Walls and bricks are axis-aligned, so their response is a sign flip on one
//! velocity component. The paddle is a disc sitting on the bottom edge and
//! reflects the ball about the normal between the two centers.

use glam::Vec2;
use rand::Rng;

use super::color::Color;
use super::state::{Ball, Brick, BrickGrid, Field, Paddle};
use crate::consts::MIN_PADDLE_DISTANCE;
use crate::distance;

/// Which brick edge the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Bottom edge; the vertical velocity flips
    Bottom,
    /// Left or right edge; the horizontal velocity flips
    Side,
}

/// Result of the brick scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    Miss,
    Hit { row: usize, col: usize, edge: Edge },
}

/// Axes that bounced off a wall this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub x: bool,
    pub y: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Touch test between a ball and one brick
///
/// A bottom touch needs the center inside the brick's x-span; a side touch
/// needs it inside the y-span. Bottom is checked first and wins.
pub fn brick_touch(ball_pos: Vec2, ball_radius: f32, brick: &Brick) -> Option<Edge> {
    let (bx, by) = (ball_pos.x, ball_pos.y);
    let (x0, y0) = (brick.pos.x, brick.pos.y);
    let (x1, y1) = (x0 + brick.width, y0 + brick.height);

    let in_x_range = bx > x0 && bx < x1;
    let in_y_range = by > y0 && by < y1;
    let touch_bottom = by - ball_radius <= y1;

    let touch_left = bx < x0 && bx + ball_radius >= x0;
    let touch_right = bx > x0 && bx - ball_radius <= x1;

    if in_x_range && touch_bottom {
        Some(Edge::Bottom)
    } else if in_y_range && (touch_left || touch_right) {
        Some(Edge::Side)
    } else {
        None
    }
}

/// First visible brick (row-major) the ball touches
///
/// First match, not closest match: only one brick is resolved per frame.
pub fn ball_collided_brick(ball: &Ball, grid: &BrickGrid) -> BrickHit {
    grid.iter()
        .filter(|(_, brick)| brick.is_visible())
        .find_map(|((row, col), brick)| {
            brick_touch(ball.pos, ball.radius, brick).map(|edge| BrickHit::Hit { row, col, edge })
        })
        .unwrap_or(BrickHit::Miss)
}

/// Flip the velocity component for each wall the ball would cross next frame
///
/// Near edges compare with `<=`, far edges with a strict `>`.
pub fn wall_collision(ball: &mut Ball, field: &Field) -> WallHit {
    let next = ball.next_pos();
    let r = ball.radius;
    let size = field.size();

    let hit = WallHit {
        x: next.x <= r || next.x > size.x - r,
        y: next.y <= r || next.y > size.y - r,
    };

    if hit.x {
        ball.vel.x = -ball.vel.x;
    }
    if hit.y {
        ball.vel.y = -ball.vel.y;
    }

    hit
}

/// Unit normal from the paddle center toward the ball center
///
/// Falls back to straight up when the centers (nearly) coincide.
pub fn paddle_normal(ball_pos: Vec2, paddle_center: Vec2) -> Vec2 {
    let rel = ball_pos - paddle_center;
    let dist = rel.length();
    if dist < MIN_PADDLE_DISTANCE {
        Vec2::NEG_Y
    } else {
        rel / dist
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Predictive ball/paddle check and bounce
///
/// Hits when the ball's next position overlaps the paddle disc while the ball
/// is moving toward the paddle. The reflected velocity is rescaled to the
/// ball's constant speed and the paddle gets a new random color.
pub fn paddle_collision<R: Rng>(
    ball: &mut Ball,
    paddle: &mut Paddle,
    field: &Field,
    rng: &mut R,
) -> bool {
    let center = paddle.center(field);
    if distance(ball.next_pos(), center) > ball.radius + paddle.radius {
        return false;
    }

    let normal = paddle_normal(ball.pos, center);
    if ball.vel.dot(normal) >= 0.0 {
        // Already leaving the paddle; the position only advances once per
        // frame, so without this a bounced ball can re-trigger next frame
        return false;
    }

    let reflected = reflect_velocity(ball.vel, normal);
    ball.vel = reflected.normalize_or_zero() * ball.speed;
    paddle.color = Color::random(rng);

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        Ball::new(Vec2::new(x, y), vel, 20.0, Color::from_rgb(0x112233))
    }

    fn single_brick() -> BrickGrid {
        BrickGrid::from_rows(vec![vec![Brick::new(Vec2::ZERO, 100.0, 50.0)]])
    }

    fn field() -> Field {
        Field {
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_brick_miss_outside_x_range() {
        let ball = ball_at(200.0, 300.0, Vec2::new(0.0, 6.0));
        assert_eq!(ball_collided_brick(&ball, &single_brick()), BrickHit::Miss);
    }

    #[test]
    fn test_brick_bottom_touch() {
        // 49 - 20 = 29 <= 50
        let ball = ball_at(50.0, 49.0, Vec2::new(6.0, -6.0));
        assert_eq!(
            ball_collided_brick(&ball, &single_brick()),
            BrickHit::Hit {
                row: 0,
                col: 0,
                edge: Edge::Bottom
            }
        );
    }

    #[test]
    fn test_brick_bottom_touch_boundary() {
        let brick = Brick::new(Vec2::ZERO, 100.0, 50.0);
        // Top of ball exactly on the brick bottom
        assert_eq!(brick_touch(Vec2::new(50.0, 70.0), 20.0, &brick), Some(Edge::Bottom));
        assert_eq!(brick_touch(Vec2::new(50.0, 70.5), 20.0, &brick), None);
    }

    #[test]
    fn test_brick_side_touch_left_and_right() {
        let brick = Brick::new(Vec2::new(100.0, 0.0), 100.0, 50.0);
        // Left of the brick, right edge of ball reaches x = 100
        assert_eq!(brick_touch(Vec2::new(85.0, 25.0), 20.0, &brick), Some(Edge::Side));
        // Right of the brick, left edge of ball reaches x = 200
        assert_eq!(brick_touch(Vec2::new(215.0, 25.0), 20.0, &brick), Some(Edge::Side));
        // Too far right
        assert_eq!(brick_touch(Vec2::new(221.0, 25.0), 20.0, &brick), None);
        // Beside the brick but outside its y-span
        assert_eq!(brick_touch(Vec2::new(85.0, 60.0), 20.0, &brick), None);
    }

    #[test]
    fn test_brick_bottom_wins_over_side() {
        let brick = Brick::new(Vec2::ZERO, 100.0, 50.0);
        // Center inside both spans
        assert_eq!(brick_touch(Vec2::new(50.0, 25.0), 20.0, &brick), Some(Edge::Bottom));
    }

    #[test]
    fn test_brick_scan_skips_invisible_and_takes_first() {
        let field = Field {
            width: 300,
            height: 350,
        };
        // Three bricks 100 wide, 50 tall on one row; the ball touches (0,0) and (0,1)
        let mut grid = BrickGrid::populate(1, 3, &field, 1.0 / 7.0);
        let ball = ball_at(105.0, 30.0, Vec2::new(0.0, -6.0));

        assert_eq!(
            ball_collided_brick(&ball, &grid),
            BrickHit::Hit {
                row: 0,
                col: 0,
                edge: Edge::Side
            }
        );

        grid.get_mut(0, 0).unwrap().destroy();
        assert_eq!(
            ball_collided_brick(&ball, &grid),
            BrickHit::Hit {
                row: 0,
                col: 1,
                edge: Edge::Bottom
            }
        );
    }

    #[test]
    fn test_wall_far_x_edge() {
        let mut ball = ball_at(780.0, 300.0, Vec2::new(6.0, 3.0));
        let hit = wall_collision(&mut ball, &field());
        assert_eq!(hit, WallHit { x: true, y: false });
        assert_eq!(ball.vel, Vec2::new(-6.0, 3.0));
        // Response only touches velocity
        assert_eq!(ball.pos, Vec2::new(780.0, 300.0));
    }

    #[test]
    fn test_wall_edge_asymmetry() {
        // Near edge is inclusive: next.x == r bounces
        let mut ball = ball_at(26.0, 300.0, Vec2::new(-6.0, 0.0));
        assert!(wall_collision(&mut ball, &field()).x);

        // Far edge is strict: next.x == width - r does not bounce
        let mut ball = ball_at(774.0, 300.0, Vec2::new(6.0, 0.0));
        assert!(!wall_collision(&mut ball, &field()).x);
    }

    #[test]
    fn test_wall_top_edge_keeps_x() {
        let mut ball = ball_at(400.0, 22.0, Vec2::new(6.0, -6.0));
        let hit = wall_collision(&mut ball, &field());
        assert_eq!(hit, WallHit { x: false, y: true });
        assert_eq!(ball.vel, Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_wall_corner_flips_both() {
        let mut ball = ball_at(22.0, 22.0, Vec2::new(-6.0, -6.0));
        let hit = wall_collision(&mut ball, &field());
        assert!(hit.x && hit.y);
        assert_eq!(ball.vel, Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_paddle_normal_degenerate() {
        let c = Vec2::new(400.0, 600.0);
        assert_eq!(paddle_normal(c, c), Vec2::NEG_Y);
        let n = paddle_normal(Vec2::new(400.0, 500.0), c);
        assert!((n - Vec2::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_paddle_head_on_bounce() {
        let mut rng = Pcg32::seed_from_u64(3);
        let f = field();
        let mut paddle = Paddle {
            x: 400.0,
            radius: 50.0,
            color: Color::from_rgb(0),
        };
        // Ball straight above the paddle, falling; next y = 532, gap 68 <= 70
        let mut ball = ball_at(400.0, 526.0, Vec2::new(0.0, 6.0));
        ball.speed = 6.0;
        let expected_color = Color::random(&mut rng.clone());

        assert!(paddle_collision(&mut ball, &mut paddle, &f, &mut rng));
        assert!(ball.vel.x.abs() < 1e-5);
        assert!((ball.vel.y + 6.0).abs() < 1e-5);
        // Recolored from the session RNG
        assert_eq!(paddle.color, expected_color);
        assert_ne!(paddle.color, Color::from_rgb(0));
    }

    #[test]
    fn test_paddle_bounce_rescales_to_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let f = field();
        let mut paddle = Paddle {
            x: 400.0,
            radius: 50.0,
            color: Color::from_rgb(0),
        };
        let mut ball = ball_at(350.0, 540.0, Vec2::new(6.0, 6.0));
        let before = ball.vel.length();

        assert!(paddle_collision(&mut ball, &mut paddle, &f, &mut rng));
        assert!((ball.vel.length() - before).abs() < 1e-4);
        // Deflected upward and to the left
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_paddle_ignores_receding_ball() {
        let mut rng = Pcg32::seed_from_u64(3);
        let f = field();
        let mut paddle = Paddle {
            x: 400.0,
            radius: 50.0,
            color: Color::from_rgb(0),
        };
        let mut ball = ball_at(400.0, 540.0, Vec2::new(0.0, -6.0));
        assert!(!paddle_collision(&mut ball, &mut paddle, &f, &mut rng));
        assert_eq!(ball.vel, Vec2::new(0.0, -6.0));
        assert_eq!(paddle.color, Color::from_rgb(0));
    }

    #[test]
    fn test_paddle_miss() {
        let mut rng = Pcg32::seed_from_u64(3);
        let f = field();
        let mut paddle = Paddle {
            x: 100.0,
            radius: 50.0,
            color: Color::from_rgb(0),
        };
        let mut ball = ball_at(400.0, 560.0, Vec2::new(0.0, 6.0));
        assert!(!paddle_collision(&mut ball, &mut paddle, &f, &mut rng));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wall_flips_only_crossed_axis(
                x in 20.0f32..780.0,
                y in 20.0f32..580.0,
                dx in -10.0f32..10.0,
                dy in -10.0f32..10.0,
            ) {
                let mut ball = ball_at(x, y, Vec2::new(dx, dy));
                let next = ball.next_pos();
                let hit = wall_collision(&mut ball, &field());

                let crossed_x = next.x <= 20.0 || next.x > 780.0;
                let crossed_y = next.y <= 20.0 || next.y > 580.0;
                prop_assert_eq!(hit, WallHit { x: crossed_x, y: crossed_y });
                prop_assert_eq!(ball.vel.x, if crossed_x { -dx } else { dx });
                prop_assert_eq!(ball.vel.y, if crossed_y { -dy } else { dy });
            }

            #[test]
            fn scan_returns_first_match_in_row_major_order(
                x in 0.0f32..600.0,
                y in 0.0f32..300.0,
                hidden in prop::collection::vec(any::<bool>(), 12),
            ) {
                let field = Field { width: 600, height: 350 };
                let mut grid = BrickGrid::populate(3, 4, &field, 0.5);
                for (i, hide) in hidden.iter().enumerate() {
                    if *hide {
                        grid.get_mut(i / 4, i % 4).unwrap().destroy();
                    }
                }
                let ball = ball_at(x, y, Vec2::new(1.0, 1.0));

                let mut expected = BrickHit::Miss;
                'scan: for row in 0..3 {
                    for col in 0..4 {
                        let brick = grid.get(row, col).unwrap();
                        if !brick.is_visible() {
                            continue;
                        }
                        if let Some(edge) = brick_touch(ball.pos, ball.radius, brick) {
                            expected = BrickHit::Hit { row, col, edge };
                            break 'scan;
                        }
                    }
                }
                prop_assert_eq!(ball_collided_brick(&ball, &grid), expected);
            }

            #[test]
            fn paddle_bounce_keeps_speed(
                angle in 0.2f32..2.9,
                gap in 55.0f32..69.0,
                heading in -1.0f32..1.0,
            ) {
                let mut rng = Pcg32::seed_from_u64(11);
                let f = field();
                let mut paddle = Paddle { x: 400.0, radius: 50.0, color: Color::from_rgb(0) };
                let center = paddle.center(&f);
                // Somewhere on the upper half-ring around the paddle, heading roughly at it
                let pos = center + Vec2::new(angle.cos(), -angle.sin()) * gap;
                let toward = (center - pos).normalize();
                let vel = (toward + toward.perp() * heading * 0.5).normalize() * 6.0;
                let mut ball = ball_at(pos.x, pos.y, vel);
                let speed = ball.speed;

                if paddle_collision(&mut ball, &mut paddle, &f, &mut rng) {
                    prop_assert!((ball.vel.length() - speed).abs() < 1e-3);
                    // Leaves the paddle
                    prop_assert!(ball.vel.dot(paddle_normal(ball.pos, center)) > 0.0);
                }
            }
        }
    }
}

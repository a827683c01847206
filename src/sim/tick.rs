//! Per-frame simulation step
//!
//! Order within a frame: input, bricks, paddle, walls, move. Collision
//! handlers only touch velocity, color and visibility; the ball position is
//! advanced exactly once, at the end.

use super::collision::{
    BrickHit, Edge, ball_collided_brick, paddle_collision, wall_collision,
};
use super::color::Color;
use super::state::GameState;
use crate::config::InputMode;

/// Input for a single frame
///
/// `pointer_x` holds only the latest pointer position received since the
/// previous frame; intermediate positions are dropped.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in field coordinates
    pub pointer_x: Option<f32>,
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
}

/// Something that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { row: usize, col: usize, edge: Edge },
    PaddleHit,
    WallBounce { x: bool, y: bool },
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Paddle input
    match state.input_mode() {
        InputMode::Pointer => {
            if let Some(x) = input.pointer_x {
                state.paddle.follow_pointer(x, &state.field);
            }
        }
        InputMode::Keyboard => state.paddle.step(input.left, input.right, &state.field),
    }

    // Bricks
    if let BrickHit::Hit { row, col, edge } = ball_collided_brick(&state.ball, &state.bricks) {
        if apply_brick_hit(state, row, col, edge) {
            events.push(GameEvent::BrickDestroyed { row, col, edge });
        }
    }

    // Paddle
    if paddle_collision(&mut state.ball, &mut state.paddle, &state.field, &mut state.rng) {
        log::trace!(
            "Paddle hit at ({:.1}, {:.1}), new velocity ({:.2}, {:.2})",
            state.ball.pos.x,
            state.ball.pos.y,
            state.ball.vel.x,
            state.ball.vel.y
        );
        events.push(GameEvent::PaddleHit);
    }

    // Walls
    let wall = wall_collision(&mut state.ball, &state.field);
    if wall.any() {
        events.push(GameEvent::WallBounce {
            x: wall.x,
            y: wall.y,
        });
    }

    state.ball.advance();
    state.frame += 1;

    events
}

/// Respond to a brick hit: recolor the ball, bounce, remove the brick, score
///
/// Returns false if (row, col) is not a visible brick.
pub fn apply_brick_hit(state: &mut GameState, row: usize, col: usize, edge: Edge) -> bool {
    let Some(brick) = state.bricks.get_mut(row, col).filter(|b| b.is_visible()) else {
        return false;
    };
    brick.destroy();

    state.ball.color = Color::random_distinct(&mut state.rng, state.ball.color);
    match edge {
        Edge::Bottom => state.ball.vel.y = -state.ball.vel.y,
        Edge::Side => state.ball.vel.x = -state.ball.vel.x,
    }
    state.score += 1;

    log::debug!(
        "Brick ({}, {}) destroyed on {:?} edge, score {}",
        row,
        col,
        edge,
        state.score
    );
    if state.is_cleared() {
        log::info!("All {} bricks destroyed", state.bricks.len());
    }

    true
}

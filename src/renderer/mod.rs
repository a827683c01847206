//! Rendering module
//!
//! The simulation never draws. A frame is pushed through the `Renderer`
//! capability, which only knows how to clear and fill shapes; the browser
//! backend maps it onto the Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dRenderer;

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameState;

/// Drawing primitives, colors are CSS color strings
pub trait Renderer {
    /// Clear the region from the origin to (width, height)
    fn clear(&mut self, width: f32, height: f32);

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: &str);

    fn draw_rect(&mut self, top_left: Vec2, width: f32, height: f32, fill: &str, stroke: &str);

    /// Text anchored at its baseline start
    fn draw_text(&mut self, text: &str, pos: Vec2, fill: &str);
}

/// Draw one frame: paddle, ball, score, then the visible bricks
pub fn render_frame<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    let size = state.field.size();
    renderer.clear(size.x, size.y);

    let paddle = &state.paddle;
    renderer.draw_circle(
        paddle.center(&state.field),
        paddle.radius,
        &paddle.color.to_string(),
    );

    let ball = &state.ball;
    renderer.draw_circle(ball.pos, ball.radius, &ball.color.to_string());

    renderer.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(SCORE_MARGIN, size.y - SCORE_MARGIN),
        SCORE_COLOR,
    );

    for (_, brick) in state.bricks.iter().filter(|(_, b)| b.is_visible()) {
        renderer.draw_rect(brick.pos, brick.width, brick.height, BRICK_FILL, BRICK_STROKE);
    }
}

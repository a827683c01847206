//! Brick Pong - breakout bricks with a pong paddle
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, game loop)
//! - `renderer`: Draw capability and the Canvas 2D backend
//! - `config`: Construction-time game configuration
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, InputMode};
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Paddle step per frame while an arrow key is held
    pub const KEYBOARD_PADDLE_STEP: f32 = 2.0;
    /// Extra clearance kept between the paddle and the field edge in keyboard mode
    pub const KEYBOARD_EDGE_MARGIN: f32 = 0.5;

    /// Ball/paddle center distance below which the paddle normal points straight up
    pub const MIN_PADDLE_DISTANCE: f32 = 1.0e-3;

    /// Random draws before falling back to the complement color
    pub const MAX_COLOR_RETRIES: u32 = 8;

    /// Brick colors
    pub const BRICK_FILL: &str = "orange";
    pub const BRICK_STROKE: &str = "purple";

    /// Score HUD
    pub const SCORE_COLOR: &str = "#0095DD";
    pub const SCORE_FONT: &str = "16px Arial";
    pub const SCORE_MARGIN: f32 = 8.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    let dx = (p1.x - p2.x).abs();
    let dy = (p1.y - p2.y).abs();
    (dx * dx + dy * dy).sqrt()
}

/// Length of the vector (a, b)
#[inline]
pub fn hypotenuse(a: f32, b: f32) -> f32 {
    ((a * a).abs() + (b * b).abs()).sqrt()
}

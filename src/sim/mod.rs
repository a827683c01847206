//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - One fixed step per displayed frame
//! - Seeded RNG only
//! - Row-major brick scan order
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod state;
pub mod tick;

pub use collision::{
    BrickHit, Edge, WallHit, ball_collided_brick, brick_touch, paddle_collision, reflect_velocity,
    wall_collision,
};
pub use color::Color;
pub use state::{Ball, Brick, BrickGrid, Field, GameState, Paddle};
pub use tick::{GameEvent, TickInput, apply_brick_hit, tick};

//! Game state and entity types
//!
//! One `GameState` is a whole session: ball, paddle, brick grid, score and the
//! seeded RNG used for recoloring.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::color::Color;
use crate::config::{GameConfig, InputMode};
use crate::consts::*;
use crate::error::ConfigError;

/// Play field dimensions, owned by the host canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: u32,
    pub height: u32,
}

impl Field {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Speed restored after every paddle bounce
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            speed: vel.length(),
        }
    }

    /// Position after one more frame at the current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    /// Advance one frame
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle, a disc centered on the bottom edge of the field
#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f32,
    pub radius: f32,
    pub color: Color,
}

impl Paddle {
    /// Paddle center; y is always the field bottom
    #[inline]
    pub fn center(&self, field: &Field) -> Vec2 {
        Vec2::new(self.x, field.height as f32)
    }

    /// Follow the pointer, keeping the whole paddle inside the field
    pub fn follow_pointer(&mut self, pointer_x: f32, field: &Field) {
        if !pointer_x.is_finite() {
            return;
        }
        self.x = self.clamp_x(pointer_x, field);
    }

    /// Step while an arrow key is held
    ///
    /// The edge check runs before the step, so the result is clamped as well.
    pub fn step(&mut self, left: bool, right: bool, field: &Field) {
        let reach = self.radius + KEYBOARD_EDGE_MARGIN;
        if right && self.x + reach <= field.width as f32 {
            self.x = self.clamp_x(self.x + KEYBOARD_PADDLE_STEP, field);
        } else if left && self.x - reach >= 0.0 {
            self.x = self.clamp_x(self.x - KEYBOARD_PADDLE_STEP, field);
        }
    }

    fn clamp_x(&self, x: f32, field: &Field) -> f32 {
        let max = field.width as f32 - self.radius;
        x.clamp(self.radius, max.max(self.radius))
    }
}

/// A destructible brick
#[derive(Debug, Clone)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    visible: bool,
}

impl Brick {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            width,
            height,
            visible: true,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Remove the brick for the rest of the session
    pub fn destroy(&mut self) {
        self.visible = false;
    }
}

/// Row-major grid of bricks
#[derive(Debug, Clone)]
pub struct BrickGrid {
    rows: Vec<Vec<Brick>>,
}

impl BrickGrid {
    /// Lay out `num_rows` x `num_cols` bricks across the full field width,
    /// filling `area_fraction` of the field height
    pub fn populate(num_rows: u32, num_cols: u32, field: &Field, area_fraction: f32) -> Self {
        let width = field.width as f32 / num_cols as f32;
        let height = field.height as f32 * area_fraction / num_rows as f32;

        let rows = (0..num_rows)
            .map(|i| {
                (0..num_cols)
                    .map(|j| Brick::new(Vec2::new(j as f32 * width, i as f32 * height), width, height))
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// Grid from explicit rows
    pub fn from_rows(rows: Vec<Vec<Brick>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Brick>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Brick> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// All bricks with their (row, col), in scan order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Brick)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, brick)| ((r, c), brick)))
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn visible_count(&self) -> usize {
        self.iter().filter(|(_, b)| b.is_visible()).count()
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub field: Field,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Bricks destroyed so far
    pub score: u32,
    /// Frames simulated
    pub frame: u64,
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Build a session from a validated config
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let field = config.field();

        let ball = Ball::new(
            config.ball_start(),
            config.ball_velocity(),
            config.ball_radius,
            Color::random(&mut rng),
        );
        let paddle = Paddle {
            x: field.width as f32 / 2.0,
            radius: config.paddle_radius,
            color: Color::random(&mut rng),
        };
        let bricks = BrickGrid::populate(
            config.brick_rows,
            config.brick_cols,
            &field,
            config.brick_area_fraction,
        );

        log::info!(
            "Session created: field {}x{}, {} bricks, seed {}",
            field.width,
            field.height,
            bricks.len(),
            seed
        );

        Ok(Self {
            config,
            field,
            ball,
            paddle,
            bricks,
            score: 0,
            frame: 0,
            seed,
            rng,
        })
    }

    pub fn input_mode(&self) -> InputMode {
        self.config.input_mode
    }

    /// Every brick has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.bricks.visible_count() == 0
    }
}

//! Game configuration
//!
//! Fixed at construction time. The browser build reads an optional JSON
//! override from the page; the field size always comes from the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Field;

/// How the paddle is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Paddle follows the pointer's horizontal position
    #[default]
    Pointer,
    /// Paddle steps left/right while the arrow keys are held
    Keyboard,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Pointer => "Pointer",
            InputMode::Keyboard => "Keyboard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pointer" | "mouse" => Some(InputMode::Pointer),
            "keyboard" | "keys" => Some(InputMode::Keyboard),
            _ => None,
        }
    }
}

/// Construction-time game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: u32,
    pub field_height: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Start position (x, y)
    pub ball_start: (f32, f32),
    /// Start velocity (dx, dy) in pixels per frame; its length is the ball's constant speed
    pub ball_velocity: (f32, f32),

    // === Paddle ===
    pub paddle_radius: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    /// Share of the field height covered by the brick grid
    pub brick_area_fraction: f32,

    // === Input ===
    pub input_mode: InputMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800,
            field_height: 600,

            ball_radius: 20.0,
            ball_start: (200.0, 300.0),
            ball_velocity: (6.0, -6.0),

            paddle_radius: 50.0,

            brick_rows: 3,
            brick_cols: 6,
            brick_area_fraction: 1.0 / 3.5,

            input_mode: InputMode::Pointer,
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the field size (the canvas owns it)
    pub fn with_field(mut self, width: u32, height: u32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    pub fn field(&self) -> Field {
        Field {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(self.ball_start.0, self.ball_start.1)
    }

    pub fn ball_velocity(&self) -> Vec2 {
        Vec2::new(self.ball_velocity.0, self.ball_velocity.1)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("ball_radius", self.ball_radius),
            ("ball_start.x", self.ball_start.0),
            ("ball_start.y", self.ball_start.1),
            ("ball_velocity.x", self.ball_velocity.0),
            ("ball_velocity.y", self.ball_velocity.1),
            ("paddle_radius", self.paddle_radius),
            ("brick_area_fraction", self.brick_area_fraction),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(name));
        }

        if self.field_width == 0 || self.field_height == 0 {
            return Err(ConfigError::ZeroField);
        }
        if self.ball_radius <= 0.0 || self.paddle_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius);
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.brick_area_fraction <= 0.0 || self.brick_area_fraction > 1.0 {
            return Err(ConfigError::InvalidBrickArea);
        }
        let (w, h) = (self.field_width as f32, self.field_height as f32);
        if self.brick_cols > self.field_width
            || h * self.brick_area_fraction < self.brick_rows as f32
        {
            return Err(ConfigError::BrickTooSmall);
        }
        if self.ball_velocity().length_squared() == 0.0 {
            return Err(ConfigError::ZeroVelocity);
        }

        let (x, y) = self.ball_start;
        let r = self.ball_radius;
        if x < r || x > w - r || y < r || y > h - r {
            return Err(ConfigError::BallOutsideField);
        }
        if 2.0 * self.paddle_radius > w {
            return Err(ConfigError::PaddleWiderThanField);
        }

        Ok(())
    }

    /// Config element id in the host page
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-config";

    /// Load the config embedded in the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from page");
                    return config;
                }
                Err(e) => log::error!("Ignoring invalid game config: {}", e),
            }
        }

        log::info!("Using default game config");
        Self::default()
    }
}

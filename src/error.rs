//! Configuration errors
//!
//! A session is only built from a validated `GameConfig`; anything malformed is
//! rejected here instead of surfacing as bad physics later.

use std::error::Error;
use std::fmt::Display;

#[derive(Debug)]
pub enum ConfigError {
    /// Field width or height is zero
    ZeroField,
    /// Ball or paddle radius is not positive
    NonPositiveRadius,
    /// Brick grid has no rows or no columns
    EmptyGrid,
    /// Brick area fraction outside (0, 1]
    InvalidBrickArea,
    /// Grid is so fine that a brick would be under one pixel on a side
    BrickTooSmall,
    /// Initial ball velocity is zero, so there is no speed to preserve
    ZeroVelocity,
    /// A numeric field is NaN or infinite
    NonFinite(&'static str),
    /// Ball does not fit inside the field at its start position
    BallOutsideField,
    /// Paddle diameter exceeds the field width
    PaddleWiderThanField,
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroField => Display::fmt("field dimensions must be non-zero", f),
            ConfigError::NonPositiveRadius => Display::fmt("radii must be positive", f),
            ConfigError::EmptyGrid => Display::fmt("brick grid needs at least one row and column", f),
            ConfigError::InvalidBrickArea => {
                Display::fmt("brick area fraction must be in (0, 1]", f)
            }
            ConfigError::BrickTooSmall => {
                Display::fmt("brick grid too fine for the field, bricks must be at least 1px", f)
            }
            ConfigError::ZeroVelocity => Display::fmt("initial ball velocity must be non-zero", f),
            ConfigError::NonFinite(name) => write!(f, "{name} must be finite"),
            ConfigError::BallOutsideField => {
                Display::fmt("ball start position must lie inside the field", f)
            }
            ConfigError::PaddleWiderThanField => {
                Display::fmt("paddle is wider than the field", f)
            }
            ConfigError::Json(err) => Display::fmt(err, f),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Json(source) => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

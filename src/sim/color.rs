//! Random 24-bit fill colors

use rand::Rng;
use std::fmt;

use crate::consts::MAX_COLOR_RETRIES;

/// An opaque RGB color, formatted as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const MAX: u32 = 0xFF_FFFF;

    pub fn from_rgb(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    pub fn rgb(self) -> u32 {
        self.0
    }

    /// Bitwise complement; never equal to `self`
    pub fn complement(self) -> Self {
        Self(!self.0 & Self::MAX)
    }

    /// Uniform color over the full 24-bit space
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=Self::MAX))
    }

    /// Random color different from `current`
    ///
    /// Resamples a bounded number of times, then takes the complement.
    pub fn random_distinct<R: Rng>(rng: &mut R, current: Color) -> Self {
        for _ in 0..MAX_COLOR_RETRIES {
            let color = Self::random(rng);
            if color != current {
                return color;
            }
        }
        log::warn!("Color sampler kept returning {}, using complement", current);
        current.complement()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

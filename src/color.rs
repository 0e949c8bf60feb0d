//! RGBA color for tag chips.
//!
//! [`Rgba`] carries the chip background and label colors and picks a
//! readable label color for a given background.
//!
//! # Examples
//!
//! ```
//! use tagtext::Rgba;
//!
//! assert_eq!(Rgba::ORANGE.contrasting_text(), Rgba::BLACK);
//! assert_eq!(Rgba::ORANGE.to_string(), "#FFA500");
//! ```

use std::fmt;

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// `#FFA500`, the default chip background.
    pub const ORANGE: Self = Self {
        r: 1.0,
        g: 165.0 / 255.0,
        b: 0.0,
        a: 1.0,
    };

    /// Convert to u8 RGB tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Perceived brightness, BT.601 weights.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    /// Black or white, whichever reads better on top of this color.
    #[must_use]
    pub fn contrasting_text(self) -> Self {
        if self.luminance() > 0.5 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `#RRGGBB`, or `#RRGGBBAA` when translucent.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb_u8();
        if self.is_opaque() {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{:02X}", to_u8(self.a))
        }
    }
}

//! Chip styling: label color, chip background, and label attributes.
//!
//! # Examples
//!
//! ```
//! use tagtext::{Rgba, Style, TextAttributes};
//!
//! // Default chip look: orange background, black label.
//! let chip = Style::chip(Rgba::ORANGE);
//! assert_eq!(chip.fg, Some(Rgba::BLACK));
//!
//! let loud = chip.with_bold();
//! assert!(loud.attributes.contains(TextAttributes::BOLD));
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Attributes applied to a chip label.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        const BOLD      = 0x01;
        const ITALIC    = 0x02;
        const UNDERLINE = 0x04;
    }
}

/// How a tag chip is drawn.
///
/// `None` for a color means "use the host's default".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Label color.
    pub fg: Option<Rgba>,
    /// Chip background.
    pub bg: Option<Rgba>,
    pub attributes: TextAttributes,
}

impl Style {
    /// No colors, no attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Chip on `background` with whichever of black or white reads better.
    #[must_use]
    pub fn chip(background: Rgba) -> Self {
        Self {
            fg: Some(background.contrasting_text()),
            bg: Some(background),
            attributes: TextAttributes::empty(),
        }
    }

    /// Return a new style with the specified attributes added.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            ..self
        }
    }

    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }
}

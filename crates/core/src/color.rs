//! Tile colors.
//!
//! Colors are plain RGB triples. Any integer that becomes a channel value is
//! folded into `0..=255` with Euclidean modulo, whether it comes from a work
//! file, from the channel entry widget or from the command line. Rendering
//! converts to ARGB8888 (0xAARRGGBB), the framebuffer format of the frontend.

use serde::{Deserialize, Serialize};

use crate::picker::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Default paint color of a new session.
    pub const BLACKISH: Color = Color::rgb(50, 50, 50);
    pub const WHITISH: Color = Color::rgb(200, 200, 200);
    pub const DARK_REDDISH: Color = Color::rgb(155, 28, 28);
    pub const DARK_GREENISH: Color = Color::rgb(28, 155, 28);
    pub const DARK_BLUEISH: Color = Color::rgb(28, 28, 155);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unreduced channel values, folding each one mod 256.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: fold_channel(r),
            g: fold_channel(g),
            b: fold_channel(b),
        }
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }

    /// Opaque ARGB8888 pixel value.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Reduce an arbitrary integer into a channel value (`300 -> 44`, `-1 -> 255`).
#[inline]
pub fn fold_channel(value: i64) -> u8 {
    value.rem_euclid(256) as u8
}

//! Color constants for the PIN entry widget.
//!
//! Standard colors come from the `RgbColor` trait constants so they map to the
//! exact channel extremes of the Rgb565 format (5 bits red, 6 bits green,
//! 5 bits blue). Widget defaults are chosen for a light surface: dark outlines
//! and text, a gray hint.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Default outline and text color.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default surface color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0).
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0).
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue (0, 0, 31).
pub const BLUE: Rgb565 = Rgb565::BLUE;

// =============================================================================
// Widget Palette
// =============================================================================

/// Mid gray used for hint characters.
/// RGB565: (16, 32, 16) - roughly 50% brightness.
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Light gray for the simulator's event log text.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(24, 48, 24);

/// Accent used for the active slot outline in the demo configuration.
/// RGB565: (4, 36, 28) - a teal blue.
pub const ACCENT: Rgb565 = Rgb565::new(4, 36, 28);

/// Error red, slightly darker than pure red so it reads on white.
pub const ERROR_RED: Rgb565 = Rgb565::new(27, 8, 6);

/// Success green, darker than pure green for contrast on white.
pub const SUCCESS_GREEN: Rgb565 = Rgb565::new(4, 44, 10);

/// Pale red wash for slot backgrounds in the error state.
pub const ERROR_WASH: Rgb565 = Rgb565::new(31, 56, 28);

/// Pale green wash for slot backgrounds in the success state.
pub const SUCCESS_WASH: Rgb565 = Rgb565::new(26, 62, 26);

// =============================================================================
// Channel Helpers
// =============================================================================

/// Build an Rgb565 color from 8-bit channels by dropping the low bits.
#[inline]
pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Parse `#RRGGBB` (or `RRGGBB`) into an Rgb565 color.
///
/// Returns `None` for anything that is not exactly six hex digits.
pub fn parse_hex(value: &str) -> Option<Rgb565> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: core::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(from_rgb888(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

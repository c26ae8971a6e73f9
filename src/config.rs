//! Compile-time defaults and timing constants.
//!
//! Everything a freshly constructed [`PinEntryView`](crate::PinEntryView)
//! uses before any runtime configuration is applied. Runtime overrides come
//! from [`settings`](crate::settings) or the view's setters.

use std::time::Duration;

// =============================================================================
// Slot Layout Defaults
// =============================================================================

/// Number of slots (and maximum text length).
pub const DEFAULT_SLOT_COUNT: usize = 4;

/// Slot width in pixels.
pub const DEFAULT_SLOT_WIDTH: u32 = 48;

/// Slot height in pixels.
pub const DEFAULT_SLOT_HEIGHT: u32 = 48;

/// Gap between adjacent slots in pixels.
pub const DEFAULT_SLOT_SPACING: u32 = 5;

/// Corner radius in pixels. Zero draws square corners.
pub const DEFAULT_CORNER_RADIUS: u32 = 0;

/// Outline stroke width in pixels.
pub const DEFAULT_BORDER_WIDTH: u32 = 2;

/// Glyph cell height in pixels used to pick the font and size the mask dot.
pub const DEFAULT_TEXT_SIZE: u32 = 24;

/// Caret stroke width in pixels.
pub const DEFAULT_CURSOR_WIDTH: u32 = 2;

/// Extra caret length above and below the text, in pixels per side.
/// The caret grows by `2 * CURSOR_EXTENT_UNIT` when the slot has room.
pub const CURSOR_EXTENT_UNIT: u32 = 2;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Caret blink half-period: visible for one interval, hidden for the next.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Duration of the scale/fade-in applied to a newly entered character.
pub const ENTRY_ANIMATION_DURATION: Duration = Duration::from_millis(150);

/// Duration of the horizontal shake played when entering the error state.
pub const SHAKE_DURATION: Duration = Duration::from_millis(700);

/// Duration of the scale pulse played when entering the success state.
pub const SUCCESS_PULSE_DURATION: Duration = Duration::from_millis(500);

/// Target frame time for the simulator loop (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Simulator Window
// =============================================================================

/// Simulator display width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Simulator display height in pixels.
pub const SCREEN_HEIGHT: u32 = 160;

/// Vertical offset of the widget inside the simulator display.
pub const WIDGET_TOP: i32 = 24;

//! Text styles and font selection.
//!
//! Glyphs are drawn with `ProFont` bitmap fonts. The widget's text size is a
//! pixel height, so the font is picked as the largest `ProFont` whose glyph
//! cell fits in that height. The entry animation shrinks the text size, which
//! steps down through the smaller fonts as it plays.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    text::{Alignment as TextAlignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

use crate::colors::{BLACK, GRAY};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered both ways on the anchor point. Used for slot glyphs.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(TextAlignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left-aligned, top baseline. Used for simulator overlay lines.
pub const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(TextAlignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font Selection
// =============================================================================

/// Glyph fonts from smallest to largest.
const GLYPH_FONTS: [&MonoFont<'static>; 7] = [
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

/// Largest font whose glyph cell is at most `text_size` pixels tall.
/// Falls back to the smallest font when none fits.
pub fn font_for_size(text_size: u32) -> &'static MonoFont<'static> {
    GLYPH_FONTS
        .iter()
        .rev()
        .find(|font| font.character_size.height <= text_size)
        .copied()
        .unwrap_or(GLYPH_FONTS[0])
}

/// Glyph style for a text size and color.
#[inline]
pub fn glyph_style(text_size: u32, color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(font_for_size(text_size), color)
}

// =============================================================================
// Overlay Styles (simulator)
// =============================================================================

/// Event log lines in the simulator.
pub const LOG_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_9_POINT, GRAY);

/// Status line (state, shape, gravity) in the simulator.
pub const STATUS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_10_POINT, BLACK);

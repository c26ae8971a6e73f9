//! Style snapshot consumed by geometry and rendering.
//!
//! A [`StyleConfig`] holds every value that affects where slots land and how
//! their shapes are built. It is copied into each layout pass, so a render
//! never observes a half-applied change.
//!
//! Invalid values never fail: out-of-range radii are clamped to what the
//! active shape can draw and unknown shape or gravity names fall back to the
//! defaults. Each correction is logged once, where it happens.

use tracing::warn;

use crate::config::{
    CURSOR_EXTENT_UNIT,
    DEFAULT_BORDER_WIDTH,
    DEFAULT_CORNER_RADIUS,
    DEFAULT_SLOT_COUNT,
    DEFAULT_SLOT_HEIGHT,
    DEFAULT_SLOT_SPACING,
    DEFAULT_SLOT_WIDTH,
    DEFAULT_TEXT_SIZE,
};

// =============================================================================
// Shape and Alignment
// =============================================================================

/// How each slot is outlined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeVariant {
    /// Stroked (optionally rounded) rectangle.
    #[default]
    Rectangle,
    /// Filled bar along the bottom edge of the slot.
    Line,
    /// Stroked circle inscribed in the slot.
    Circle,
    /// No outline at all; glyphs, hint and caret still draw.
    None,
}

impl ShapeVariant {
    /// Resolve a shape name, falling back to [`ShapeVariant::Rectangle`].
    ///
    /// Accepts the lowercase names used in configuration files.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!(shape = name, "unknown slot shape, using rectangle");
            Self::Rectangle
        })
    }

    /// Strict variant of [`Self::from_name`].
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Some(Self::Rectangle),
            "line" => Some(Self::Line),
            "circle" => Some(Self::Circle),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Next shape in declaration order, wrapping around. Used by the simulator.
    pub const fn next(self) -> Self {
        match self {
            Self::Rectangle => Self::Line,
            Self::Line => Self::Circle,
            Self::Circle => Self::None,
            Self::None => Self::Rectangle,
        }
    }

    /// Short label for logs and overlays.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::None => "none",
        }
    }
}

/// Horizontal placement of the slot row inside the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

impl Alignment {
    /// Resolve a gravity name, falling back to [`Alignment::Center`].
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            warn!(gravity = name, "unknown slot gravity, using center");
            Self::Center
        })
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "start" | "left" => Some(Self::Start),
            "center" | "center_horizontal" => Some(Self::Center),
            "end" | "right" => Some(Self::End),
            _ => None,
        }
    }

    /// Next alignment, wrapping around. Used by the simulator.
    pub const fn next(self) -> Self {
        match self {
            Self::Start => Self::Center,
            Self::Center => Self::End,
            Self::End => Self::Start,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

// =============================================================================
// Padding
// =============================================================================

/// Inner padding of the widget in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    /// Same padding on every side.
    pub const fn uniform(px: u32) -> Self {
        Self { left: px, top: px, right: px, bottom: px }
    }

    #[inline]
    pub const fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    #[inline]
    pub const fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

// =============================================================================
// Style Snapshot
// =============================================================================

/// Geometry-affecting style values.
///
/// Construct with [`StyleConfig::default`] and adjust fields, then call
/// [`StyleConfig::normalized`] (the view does this on every change).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleConfig {
    /// Number of slots, also the maximum text length.
    pub slot_count: usize,
    pub slot_width: u32,
    pub slot_height: u32,
    /// Gap between slots. Zero makes neighbours share their border.
    pub spacing: u32,
    pub corner_radius: u32,
    pub border_width: u32,
    /// Glyph height in pixels. Also the mask dot diameter.
    pub text_size: u32,
    pub shape: ShapeVariant,
    pub alignment: Alignment,
}

impl StyleConfig {
    pub const fn new() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            slot_width: DEFAULT_SLOT_WIDTH,
            slot_height: DEFAULT_SLOT_HEIGHT,
            spacing: DEFAULT_SLOT_SPACING,
            corner_radius: DEFAULT_CORNER_RADIUS,
            border_width: DEFAULT_BORDER_WIDTH,
            text_size: DEFAULT_TEXT_SIZE,
            shape: ShapeVariant::Rectangle,
            alignment: Alignment::Center,
        }
    }

    /// Largest corner radius the current shape can draw.
    ///
    /// - Line: half the bar thickness (the border width).
    /// - Rectangle: half of the smaller slot dimension.
    /// - Circle / None: radius is unused, so no limit applies.
    pub const fn max_corner_radius(&self) -> u32 {
        match self.shape {
            ShapeVariant::Line => self.border_width / 2,
            ShapeVariant::Rectangle => {
                let limiting = if self.slot_width < self.slot_height { self.slot_width } else { self.slot_height };
                limiting / 2
            }
            ShapeVariant::Circle | ShapeVariant::None => u32::MAX,
        }
    }

    /// Return a copy with the corner radius clamped to [`Self::max_corner_radius`].
    pub fn normalized(mut self) -> Self {
        let max = self.max_corner_radius();
        if self.corner_radius > max {
            warn!(
                radius = self.corner_radius,
                max,
                shape = self.shape.label(),
                "corner radius exceeds shape limit, clamping"
            );
            self.corner_radius = max;
        }
        self
    }

    /// Caret length for this style.
    ///
    /// The caret extends `CURSOR_EXTENT_UNIT` pixels past the text on each
    /// side when the slot is tall enough, and never exceeds the slot height.
    pub const fn cursor_height(&self) -> u32 {
        let delta = 2 * CURSOR_EXTENT_UNIT;
        let height = if self.slot_height.saturating_sub(self.text_size) > delta {
            self.text_size + delta
        } else {
            self.text_size
        };
        if height > self.slot_height { self.slot_height } else { height }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

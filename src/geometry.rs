//! Slot geometry: where each slot sits and how its shape is built.
//!
//! # Layout
//!
//! Slots are laid out left to right. The occupied width of the row is
//!
//! ```text
//! occupied = n * w + (n - 1) * s          (s > 0)
//! occupied = n * w - (n - 1) * border     (s == 0, neighbours share a border)
//! ```
//!
//! and the row starts at the left padding (Start), against the right padding
//! (End), or centered in the space between the paddings (Center). The scroll
//! offset of the host is added on both axes.
//!
//! # Border Rectangle
//!
//! The rectangle stored per slot is the *stroke centerline*: it is inset by
//! half the border width on every side so a centered stroke stays inside the
//! slot. [`SlotGeometry::outer_rect`] gives back the full slot bounds.
//!
//! # Corner Rule
//!
//! With spacing the slots are separate boxes and every corner is rounded.
//! Without spacing the row reads as one segmented box: only the outer corners
//! of the first and last slot are rounded.
//!
//! All functions are pure. Degenerate styles (zero slots, slots thinner than
//! their border) produce empty or zero-sized geometry rather than errors.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::{CornerRadii, Rectangle, RoundedRectangle},
};

use crate::style::{Alignment, Padding, ShapeVariant, StyleConfig};

// =============================================================================
// Float Primitives
// =============================================================================

/// Point in widget pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Nearest integer pixel.
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// Axis-aligned rectangle with float edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> PointF {
        PointF::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Grow (or shrink, for negative `by`) every edge by `by` pixels.
    #[inline]
    pub fn expanded(&self, by: f32) -> Self {
        Self::new(self.left - by, self.top - by, self.right + by, self.bottom + by)
    }

    /// Move horizontally.
    #[inline]
    pub fn translated(&self, dx: f32) -> Self {
        Self::new(self.left + dx, self.top, self.right + dx, self.bottom)
    }

    /// Scale about `origin`.
    pub fn scaled_about(&self, origin: PointF, factor: f32) -> Self {
        let sx = |x: f32| origin.x + (x - origin.x) * factor;
        let sy = |y: f32| origin.y + (y - origin.y) * factor;
        Self::new(sx(self.left), sy(self.top), sx(self.right), sy(self.bottom))
    }

    /// Integer pixel rectangle, rounding edges to the nearest pixel.
    /// Negative extents collapse to zero size.
    pub fn to_rectangle(&self) -> Rectangle {
        let left = self.left.round();
        let top = self.top.round();
        let width = (self.right.round() - left).max(0.0);
        let height = (self.bottom.round() - top).max(0.0);
        Rectangle::new(Point::new(left as i32, top as i32), Size::new(width as u32, height as u32))
    }
}

// =============================================================================
// Slot Geometry
// =============================================================================

/// Which corners of a slot are rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundedCorners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl RoundedCorners {
    pub const ALL: Self = Self::sides(true, true);
    pub const NONE: Self = Self::sides(false, false);

    /// Round the leading (left) and/or trailing (right) side.
    pub const fn sides(left: bool, right: bool) -> Self {
        Self { top_left: left, top_right: right, bottom_right: right, bottom_left: left }
    }

    /// Corner radii for embedded-graphics, zero where the corner is square.
    pub fn radii(&self, radius: u32) -> CornerRadii {
        let pick = |rounded: bool| if rounded { Size::new(radius, radius) } else { Size::zero() };
        CornerRadii {
            top_left: pick(self.top_left),
            top_right: pick(self.top_right),
            bottom_right: pick(self.bottom_right),
            bottom_left: pick(self.bottom_left),
        }
    }
}

/// Geometry of one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotGeometry {
    pub index: usize,
    /// Stroke centerline, inset by half the border width.
    pub border_rect: RectF,
    pub center: PointF,
    pub corners: RoundedCorners,
}

impl SlotGeometry {
    /// Full slot bounds including the outer half of the stroke.
    #[inline]
    pub fn outer_rect(&self, border_width: u32) -> RectF {
        self.border_rect.expanded(border_width as f32 / 2.0)
    }

    /// Same slot shifted horizontally (shake animation).
    pub fn translated(&self, dx: f32) -> Self {
        Self {
            border_rect: self.border_rect.translated(dx),
            center: PointF::new(self.center.x + dx, self.center.y),
            ..*self
        }
    }

    /// Same slot scaled about `origin` (success pulse).
    pub fn scaled_about(&self, origin: PointF, factor: f32) -> Self {
        let border_rect = self.border_rect.scaled_about(origin, factor);
        Self { border_rect, center: border_rect.center(), ..*self }
    }
}

/// Space the row is laid out in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutFrame {
    /// Total widget width in pixels, padding included.
    pub width: f32,
    pub padding: Padding,
    /// Host scroll offset, added to every coordinate.
    pub scroll: PointF,
}

impl LayoutFrame {
    pub const fn new(width: f32, padding: Padding) -> Self {
        Self { width, padding, scroll: PointF::new(0.0, 0.0) }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Width covered by all slots and gaps.
pub fn occupied_width(style: &StyleConfig) -> f32 {
    if style.slot_count == 0 {
        return 0.0;
    }
    let n = style.slot_count as f32;
    let gaps = n - 1.0;
    let total = style.slot_width as f32 * n + style.spacing as f32 * gaps;
    if style.spacing == 0 { total - style.border_width as f32 * gaps } else { total }
}

/// X coordinate of the left edge of the first slot.
pub fn start_x(style: &StyleConfig, frame: &LayoutFrame) -> f32 {
    let pad_left = frame.padding.left as f32;
    let pad_right = frame.padding.right as f32;
    let occupied = occupied_width(style);
    let offset = match style.alignment {
        Alignment::Start => pad_left,
        Alignment::End => frame.width - pad_right - occupied,
        Alignment::Center => {
            let available = frame.width - pad_left - pad_right;
            pad_left + (available - occupied) / 2.0
        }
    };
    frame.scroll.x + offset
}

/// Stroke-centerline rectangle of slot `index`.
pub fn compute_slot_rect(index: usize, style: &StyleConfig, frame: &LayoutFrame) -> RectF {
    let border = style.border_width as f32;
    let half = border / 2.0;
    let i = index as f32;

    let mut left = start_x(style, frame) + i * (style.spacing + style.slot_width) as f32 + half;
    if style.spacing == 0 && index > 0 {
        left -= border * i;
    }
    let right = (left + style.slot_width as f32 - border).max(left);
    let top = frame.scroll.y + frame.padding.top as f32 + half;
    let bottom = (top + style.slot_height as f32 - border).max(top);

    RectF::new(left, top, right, bottom)
}

/// Corner rounding for slot `index` under the active shape.
///
/// A lone slot without spacing stays square for rectangles (there is no
/// neighbour to form a segmented box with) but keeps rounded ends as a line.
pub fn corners_for(index: usize, style: &StyleConfig) -> RoundedCorners {
    let n = style.slot_count;
    let first = index == 0;
    let last = index + 1 == n;
    if style.spacing != 0 {
        return RoundedCorners::ALL;
    }
    match style.shape {
        ShapeVariant::Line if n == 1 => RoundedCorners::ALL,
        ShapeVariant::Line => RoundedCorners::sides(first, last),
        _ => RoundedCorners::sides(first && !last, last && !first),
    }
}

/// Geometry for every slot, in index order.
pub fn layout_slots(style: &StyleConfig, frame: &LayoutFrame) -> Vec<SlotGeometry> {
    (0..style.slot_count)
        .map(|index| {
            let border_rect = compute_slot_rect(index, style, frame);
            SlotGeometry {
                index,
                border_rect,
                center: border_rect.center(),
                corners: corners_for(index, style),
            }
        })
        .collect()
}

// =============================================================================
// Shape Geometry
// =============================================================================

/// Stroke-centerline radius of the circle shape.
pub fn circle_radius(style: &StyleConfig) -> f32 {
    let inscribed = style.slot_width.min(style.slot_height) as f32 / 2.0;
    (inscribed - style.border_width as f32 / 2.0).max(0.0)
}

/// Underline bar for the line shape: the slot's bottom edge, one border thick.
pub fn line_bar_rect(slot: &SlotGeometry, border_width: u32) -> RectF {
    let half = border_width as f32 / 2.0;
    let r = slot.border_rect;
    RectF::new(r.left - half, r.bottom - half, r.right + half, r.bottom + half)
}

/// Rounded rectangle covering the full slot, radii grown by half the border
/// so an inside-aligned stroke follows the centerline radius.
pub fn outline_shape(slot: &SlotGeometry, style: &StyleConfig) -> RoundedRectangle {
    rounded(slot.outer_rect(style.border_width), slot.corners, style.corner_radius + style.border_width / 2)
}

/// Underline bar as a rounded rectangle.
pub fn line_bar_shape(slot: &SlotGeometry, style: &StyleConfig) -> RoundedRectangle {
    rounded(line_bar_rect(slot, style.border_width), slot.corners, style.corner_radius)
}

/// Build a rounded rectangle, confining radii so opposite corners never overlap.
pub fn rounded(rect: RectF, corners: RoundedCorners, radius: u32) -> RoundedRectangle {
    let bounds = rect.to_rectangle();
    let limit = bounds.size.width.min(bounds.size.height) / 2;
    RoundedRectangle::new(bounds, corners.radii(radius.min(limit)))
}

// =============================================================================
// Measurement
// =============================================================================

/// Size constraint imposed by the host for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host dictates the size.
    Exactly(u32),
    /// The widget may be any size up to the bound.
    AtMost(u32),
    Unspecified,
}

impl MeasureSpec {
    fn resolve(self, preferred: u32) -> u32 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(bound) => preferred.min(bound),
            Self::Unspecified => preferred,
        }
    }
}

/// Preferred widget size: the occupied slot row plus padding.
pub fn preferred_size(style: &StyleConfig, padding: &Padding, width: MeasureSpec, height: MeasureSpec) -> Size {
    let row = occupied_width(style).max(0.0).round() as u32;
    let preferred_width = row + padding.horizontal();
    let preferred_height = style.slot_height + padding.vertical();
    Size::new(width.resolve(preferred_width), height.resolve(preferred_height))
}

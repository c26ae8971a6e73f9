//! Render pipeline: per-slot drawing onto any Rgb565 `DrawTarget`.
//!
//! Rendering is split in two steps:
//!
//! 1. [`plan_frame`] decides, for every slot, what to draw and in which
//!    color. It is pure and allocation-light, so tests assert on the plan.
//! 2. [`draw_plan`] executes the plan with embedded-graphics primitives.
//!
//! # Per-Slot Order
//!
//! | Step | What |
//! |------|------|
//! | 1 | background fill, clipped to the slot shape |
//! | 2 | caret (active slot only, while the blink shows it) |
//! | 3 | outline: rectangle, underline bar or circle |
//! | 4 | glyph or mask dot for filled slots, hint character otherwise |
//!
//! After every slot, the next empty slot's outline is drawn once more in the
//! highlight color so it sits on top of neighbouring strokes. This second
//! pass only applies to rectangles and circles; underline bars are left as
//! they are.
//!
//! # Faults
//!
//! A draw error in one slot is logged and counted in [`RenderStats`]; the
//! remaining slots still draw.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment},
    text::Text,
};
use tracing::warn;

use crate::{
    animations::fade,
    colors::GREEN,
    geometry::{PointF, SlotGeometry, line_bar_shape, outline_shape, rounded},
    style::{ShapeVariant, StyleConfig},
    styles::{CENTERED, glyph_style},
};

// =============================================================================
// Frame Input
// =============================================================================

/// Colors resolved for the current visual state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderColors {
    /// Outline of inactive slots.
    pub line: Rgb565,
    /// Outline of the active slot.
    pub highlight_line: Rgb565,
    pub text: Rgb565,
    pub hint: Rgb565,
    pub cursor: Rgb565,
    /// Slot fill, `None` leaves the surface untouched.
    pub background: Option<Rgb565>,
    /// Fill of the active slot. `None` uses `background`.
    pub highlight_background: Option<Rgb565>,
    /// Color behind the slots, used to fade glyphs in.
    pub surface: Rgb565,
}

/// Scale and opacity of the most recently entered character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryFrame {
    pub scale: f32,
    pub alpha: u8,
}

/// Everything a frame depends on besides geometry.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub style: &'a StyleConfig,
    /// Text as shown (after transformation).
    pub display_text: &'a str,
    /// Number of entered characters.
    pub text_len: usize,
    pub hint: Option<&'a str>,
    pub focused: bool,
    pub caret_visible: bool,
    pub cursor_width: u32,
    /// Draw filled slots as dots instead of glyphs.
    pub mask_characters: bool,
    pub hide_line_when_filled: bool,
    pub colors: RenderColors,
    pub entry: Option<EntryFrame>,
    pub anchor_lines: bool,
}

// =============================================================================
// Frame Plan
// =============================================================================

/// What occupies the middle of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotContent {
    Empty,
    Glyph(char),
    /// Filled dot standing in for a hidden character.
    Mask,
    /// Placeholder character from the hint string.
    Hint(char),
}

/// Vertical caret line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Caret {
    pub top: PointF,
    pub bottom: PointF,
    pub color: Rgb565,
    pub width: u32,
}

/// Drawing decisions for one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotPaint {
    pub geometry: SlotGeometry,
    /// Next slot to be filled while focused.
    pub active: bool,
    pub stroke: Rgb565,
    pub background: Option<Rgb565>,
    pub caret: Option<Caret>,
    /// `false` when the outline is hidden for a filled slot.
    pub outline: bool,
    pub content: SlotContent,
    pub content_color: Rgb565,
    /// Glyph height (and mask dot diameter) for this slot.
    pub text_size: u32,
}

/// Drawing decisions for a whole frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub slots: Vec<SlotPaint>,
    /// Slot whose outline is redrawn in the highlight color after all slots.
    pub highlight: Option<usize>,
    pub anchor_lines: bool,
}

/// Outcome of drawing a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub slots_drawn: u32,
    pub faults: u32,
}

/// Decide what every slot draws.
pub fn plan_frame(geometry: &[SlotGeometry], input: &FrameInput<'_>) -> FramePlan {
    let style = input.style;
    let colors = &input.colors;
    let shown: Vec<char> = input.display_text.chars().collect();
    let hint: Vec<char> = input.hint.map(|h| h.chars().collect()).unwrap_or_default();
    let cursor_height = style.cursor_height() as f32;

    let slots = geometry
        .iter()
        .map(|slot| {
            let i = slot.index;
            let active = input.focused && i == input.text_len;
            let filled = i < input.text_len;
            let stroke = if active { colors.highlight_line } else { colors.line };

            let caret = (active && input.caret_visible).then(|| Caret {
                top: PointF::new(slot.center.x, slot.center.y - cursor_height / 2.0),
                bottom: PointF::new(slot.center.x, slot.center.y + cursor_height / 2.0),
                color: colors.cursor,
                width: input.cursor_width,
            });

            let (content, base_color) = match shown.get(i) {
                Some(_) if input.mask_characters => (SlotContent::Mask, colors.text),
                Some(&c) => (SlotContent::Glyph(c), colors.text),
                None => match hint.get(i) {
                    Some(&c) => (SlotContent::Hint(c), colors.hint),
                    None => (SlotContent::Empty, colors.text),
                },
            };

            let animated = input.entry.filter(|_| i + 1 == input.text_len && shown.len() > i);
            let (text_size, content_color) = match animated {
                Some(entry) => {
                    let backdrop = colors.background.unwrap_or(colors.surface);
                    let size = (style.text_size as f32 * entry.scale).round().max(1.0) as u32;
                    (size, fade(base_color, backdrop, entry.alpha))
                }
                None => (style.text_size, base_color),
            };

            SlotPaint {
                geometry: *slot,
                active,
                stroke,
                background: if active { colors.highlight_background.or(colors.background) } else { colors.background },
                caret,
                outline: !(input.hide_line_when_filled && filled),
                content,
                content_color,
                text_size,
            }
        })
        .collect();

    let second_pass = matches!(style.shape, ShapeVariant::Rectangle | ShapeVariant::Circle);
    let highlight = (input.focused && input.text_len < style.slot_count && second_pass).then_some(input.text_len);

    FramePlan { slots, highlight, anchor_lines: input.anchor_lines }
}

// =============================================================================
// Drawing
// =============================================================================

/// Plan and draw a frame in one call.
pub fn render<D>(display: &mut D, geometry: &[SlotGeometry], input: &FrameInput<'_>) -> RenderStats
where
    D: DrawTarget<Color = Rgb565>,
{
    let plan = plan_frame(geometry, input);
    draw_plan(display, &plan, input.style, input.colors.highlight_line)
}

/// Execute a frame plan.
pub fn draw_plan<D>(display: &mut D, plan: &FramePlan, style: &StyleConfig, highlight_color: Rgb565) -> RenderStats
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut stats = RenderStats::default();

    for paint in &plan.slots {
        match draw_slot(display, paint, style, plan.anchor_lines) {
            Ok(()) => stats.slots_drawn += 1,
            Err(_) => {
                warn!(slot = paint.geometry.index, "slot draw failed, continuing with next slot");
                stats.faults += 1;
            }
        }
    }

    if let Some(paint) = plan.highlight.and_then(|i| plan.slots.get(i))
        && draw_outline(display, &paint.geometry, style, highlight_color).is_err()
    {
        warn!(slot = paint.geometry.index, "highlight pass failed");
        stats.faults += 1;
    }

    stats
}

fn draw_slot<D>(display: &mut D, paint: &SlotPaint, style: &StyleConfig, anchor_lines: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let slot = &paint.geometry;
    let area = slot.outer_rect(style.border_width).to_rectangle();

    if let Some(color) = paint.background {
        draw_background(display, slot, style, color)?;
    }

    if let Some(caret) = paint.caret {
        Line::new(caret.top.to_point(), caret.bottom.to_point())
            .into_styled(PrimitiveStyle::with_stroke(caret.color, caret.width))
            .draw(display)?;
    }

    if paint.outline {
        draw_outline(display, slot, style, paint.stroke)?;
    }

    // Content never spills into the neighbours, even while scaled.
    let mut clipped = display.clipped(&area);
    let center = slot.center.to_point();
    match paint.content {
        SlotContent::Empty => {}
        SlotContent::Mask => {
            circle_around(slot.center, paint.text_size)
                .into_styled(PrimitiveStyle::with_fill(paint.content_color))
                .draw(&mut clipped)?;
        }
        SlotContent::Glyph(c) | SlotContent::Hint(c) => {
            let mut utf8 = [0u8; 4];
            let glyph: &str = c.encode_utf8(&mut utf8);
            Text::with_text_style(glyph, center, glyph_style(paint.text_size, paint.content_color), CENTERED)
                .draw(&mut clipped)?;
        }
    }

    if anchor_lines {
        let anchor = PrimitiveStyle::with_stroke(GREEN, 1);
        let top_left = area.top_left;
        let bottom_right = area.bottom_right().unwrap_or(top_left);
        Line::new(Point::new(top_left.x, center.y), Point::new(bottom_right.x, center.y))
            .into_styled(anchor)
            .draw(&mut clipped)?;
        Line::new(Point::new(center.x, top_left.y), Point::new(center.x, bottom_right.y))
            .into_styled(anchor)
            .draw(&mut clipped)?;
    }

    Ok(())
}

fn draw_background<D>(display: &mut D, slot: &SlotGeometry, style: &StyleConfig, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let fill = PrimitiveStyle::with_fill(color);
    match style.shape {
        ShapeVariant::Rectangle => rounded(slot.border_rect, slot.corners, style.corner_radius)
            .into_styled(fill)
            .draw(display),
        ShapeVariant::Circle => inscribed_circle(slot, style)
            .into_styled(fill)
            .draw(display),
        ShapeVariant::Line | ShapeVariant::None => slot.border_rect.to_rectangle().into_styled(fill).draw(display),
    }
}

/// Outline of one slot in `color`. Inside-aligned strokes keep the outer
/// edge on the slot bounds.
fn draw_outline<D>(display: &mut D, slot: &SlotGeometry, style: &StyleConfig, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if style.border_width == 0 {
        return Ok(());
    }
    let stroke = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(style.border_width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    match style.shape {
        ShapeVariant::Rectangle => outline_shape(slot, style).into_styled(stroke).draw(display),
        ShapeVariant::Line => line_bar_shape(slot, style)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display),
        ShapeVariant::Circle => inscribed_circle(slot, style)
            .into_styled(stroke)
            .draw(display),
        ShapeVariant::None => Ok(()),
    }
}

/// Circle inscribed in the slot's outer bounds, following scaling.
fn inscribed_circle(slot: &SlotGeometry, style: &StyleConfig) -> Circle {
    let outer = slot.outer_rect(style.border_width);
    let diameter = outer.width().min(outer.height()).max(0.0).round() as u32;
    circle_around(outer.center(), diameter)
}

/// Circle of `diameter` pixels centered on a point in edge coordinates.
///
/// `Circle::with_center` treats the center as a pixel, which shifts even
/// diameters half a pixel down-right; slot centers sit between pixels.
fn circle_around(center: PointF, diameter: u32) -> Circle {
    let radius = diameter as f32 / 2.0;
    let top_left = PointF::new(center.x - radius, center.y - radius).to_point();
    Circle::new(top_left, diameter)
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{Pixel, geometry::OriginDimensions, primitives::Rectangle};
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::{
        colors::{ACCENT, BLACK, BLUE, GRAY, GREEN, RED, WHITE},
        geometry::{LayoutFrame, layout_slots},
        style::{Alignment, Padding},
    };

    fn test_style() -> StyleConfig {
        StyleConfig { alignment: Alignment::Start, ..StyleConfig::new() }
    }

    fn colors() -> RenderColors {
        RenderColors {
            line: BLACK,
            highlight_line: ACCENT,
            text: BLACK,
            hint: GRAY,
            cursor: RED,
            background: None,
            highlight_background: None,
            surface: WHITE,
        }
    }

    fn input<'a>(style: &'a StyleConfig, text: &'a str) -> FrameInput<'a> {
        FrameInput {
            style,
            display_text: text,
            text_len: text.chars().count(),
            hint: None,
            focused: true,
            caret_visible: false,
            cursor_width: 2,
            mask_characters: false,
            hide_line_when_filled: false,
            colors: colors(),
            entry: None,
            anchor_lines: false,
        }
    }

    fn slots(style: &StyleConfig) -> Vec<SlotGeometry> {
        layout_slots(style, &LayoutFrame::new(220.0, Padding::default()))
    }

    fn display() -> SimulatorDisplay<Rgb565> {
        let mut display = SimulatorDisplay::new(Size::new(220, 48));
        display.clear(WHITE).ok();
        display
    }

    fn contents(plan: &FramePlan) -> Vec<SlotContent> {
        plan.slots.iter().map(|s| s.content).collect()
    }

    // -------------------------------------------------------------------------
    // Plan: Content
    // -------------------------------------------------------------------------

    #[test]
    fn test_plan_partial_text_marks_active_slot() {
        let style = test_style();
        let plan = plan_frame(&slots(&style), &input(&style, "12"));

        assert_eq!(
            contents(&plan),
            vec![SlotContent::Glyph('1'), SlotContent::Glyph('2'), SlotContent::Empty, SlotContent::Empty]
        );
        let active: Vec<bool> = plan.slots.iter().map(|s| s.active).collect();
        assert_eq!(active, vec![false, false, true, false], "Only slot 2 is active");
        assert_eq!(plan.slots[2].stroke, ACCENT, "Active slot uses the highlight color");
        assert_eq!(plan.slots[3].stroke, BLACK, "Slot 3 is plain");
        assert_eq!(plan.highlight, Some(2), "Second pass targets the next empty slot");
    }

    #[test]
    fn test_plan_password_mask_never_shows_glyphs() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.mask_characters = true;
        let plan = plan_frame(&slots(&style), &frame);

        assert_eq!(
            contents(&plan),
            vec![SlotContent::Mask, SlotContent::Mask, SlotContent::Empty, SlotContent::Empty]
        );
        assert!(
            plan.slots.iter().all(|s| !matches!(s.content, SlotContent::Glyph(_))),
            "Masked text must never draw literal glyphs"
        );
    }

    #[test]
    fn test_plan_transformed_text_draws_glyphs() {
        let style = test_style();
        let mut frame = input(&style, "**");
        frame.text_len = 2;
        let plan = plan_frame(&slots(&style), &frame);
        assert_eq!(plan.slots[0].content, SlotContent::Glyph('*'), "Transformation output is drawn as-is");
    }

    #[test]
    fn test_plan_hint_fills_empty_slots() {
        let style = test_style();
        let mut frame = input(&style, "1");
        frame.hint = Some("abcd");
        let plan = plan_frame(&slots(&style), &frame);
        assert_eq!(
            contents(&plan),
            vec![
                SlotContent::Glyph('1'),
                SlotContent::Hint('b'),
                SlotContent::Hint('c'),
                SlotContent::Hint('d')
            ]
        );
        assert_eq!(plan.slots[1].content_color, GRAY, "Hint uses the hint color");

        frame.hint = Some("ab");
        let plan = plan_frame(&slots(&style), &frame);
        assert_eq!(plan.slots[3].content, SlotContent::Empty, "Short hint leaves later slots empty");
    }

    // -------------------------------------------------------------------------
    // Plan: Focus and Highlight
    // -------------------------------------------------------------------------

    #[test]
    fn test_plan_unfocused_has_no_active_slot() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.focused = false;
        frame.caret_visible = true;
        let plan = plan_frame(&slots(&style), &frame);
        assert!(plan.slots.iter().all(|s| !s.active), "No active slot without focus");
        assert!(plan.slots.iter().all(|s| s.caret.is_none()), "No caret without focus");
        assert_eq!(plan.highlight, None);
    }

    #[test]
    fn test_plan_full_text_skips_highlight() {
        let style = test_style();
        let plan = plan_frame(&slots(&style), &input(&style, "1234"));
        assert_eq!(plan.highlight, None, "Nothing left to highlight when full");
        assert!(plan.slots.iter().all(|s| !s.active));
    }

    #[test]
    fn test_plan_circle_gets_second_pass() {
        let style = StyleConfig { shape: ShapeVariant::Circle, ..test_style() };
        let plan = plan_frame(&slots(&style), &input(&style, "1"));
        assert_eq!(plan.highlight, Some(1));
    }

    #[test]
    fn test_plan_line_shape_skips_second_pass() {
        // Underline bars are not redrawn by the highlight pass; the active bar
        // still gets the highlight color from the per-slot stroke.
        let style = StyleConfig { shape: ShapeVariant::Line, ..test_style() };
        let plan = plan_frame(&slots(&style), &input(&style, "1"));
        assert_eq!(plan.highlight, None, "Line shape has no second highlight pass");
        assert_eq!(plan.slots[1].stroke, ACCENT);
    }

    #[test]
    fn test_plan_hide_line_when_filled() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.hide_line_when_filled = true;
        let plan = plan_frame(&slots(&style), &frame);
        let outlines: Vec<bool> = plan.slots.iter().map(|s| s.outline).collect();
        assert_eq!(outlines, vec![false, false, true, true]);
    }

    #[test]
    fn test_plan_caret_centered_in_active_slot() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.caret_visible = true;
        let plan = plan_frame(&slots(&style), &frame);

        let caret = plan.slots[2].caret.expect("Active slot should carry the caret");
        let center = plan.slots[2].geometry.center;
        assert_eq!(caret.top.x, center.x);
        assert_eq!(caret.bottom.y - caret.top.y, 28.0, "Caret height from style");
        assert_eq!((caret.top.y + caret.bottom.y) / 2.0, center.y, "Caret centered vertically");
        assert_eq!(caret.color, RED);
        assert!(plan.slots.iter().filter(|s| s.caret.is_some()).count() == 1, "Exactly one caret");
    }

    #[test]
    fn test_plan_entry_animation_on_last_char() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.entry = Some(EntryFrame { scale: 0.5, alpha: 0 });
        let plan = plan_frame(&slots(&style), &frame);

        assert_eq!(plan.slots[0].text_size, 24, "Earlier characters keep full size");
        assert_eq!(plan.slots[0].content_color, BLACK);
        assert_eq!(plan.slots[1].text_size, 12, "Last character starts at half size");
        assert_eq!(plan.slots[1].content_color, WHITE, "Fully transparent shows the surface");
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    #[test]
    fn test_draw_mask_dots() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.mask_characters = true;
        let mut display = display();
        let stats = render(&mut display, &slots(&style), &frame);

        assert_eq!(stats, RenderStats { slots_drawn: 4, faults: 0 });
        assert_eq!(display.get_pixel(Point::new(24, 24)), BLACK, "Dot in slot 0");
        assert_eq!(display.get_pixel(Point::new(77, 24)), BLACK, "Dot in slot 1");
        assert_eq!(display.get_pixel(Point::new(130, 24)), WHITE, "Slot 2 is empty");
        assert_eq!(display.get_pixel(Point::new(183, 24)), WHITE, "Slot 3 is empty");
    }

    #[test]
    fn test_draw_caret_pixels() {
        let style = test_style();
        let mut frame = input(&style, "12");
        frame.caret_visible = true;
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(130, 24)), RED, "Caret at the active slot center");
        assert_eq!(display.get_pixel(Point::new(183, 24)), WHITE, "No caret elsewhere");
    }

    #[test]
    fn test_draw_outline_colors() {
        let style = test_style();
        let mut display = display();
        render(&mut display, &slots(&style), &input(&style, "12"));
        assert_eq!(display.get_pixel(Point::new(0, 24)), BLACK, "Slot 0 outline");
        assert_eq!(display.get_pixel(Point::new(106, 24)), ACCENT, "Active slot outline highlighted");
        assert_eq!(display.get_pixel(Point::new(159, 24)), BLACK, "Slot 3 outline");
    }

    #[test]
    fn test_draw_hidden_outline_for_filled_slot() {
        let style = test_style();
        let mut frame = input(&style, "1");
        frame.hide_line_when_filled = true;
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(0, 24)), WHITE, "Filled slot has no outline");
        assert_eq!(display.get_pixel(Point::new(53, 24)), ACCENT, "Empty slot keeps its outline");
    }

    #[test]
    fn test_draw_line_shape_bar() {
        let style = StyleConfig { shape: ShapeVariant::Line, ..test_style() };
        let mut frame = input(&style, "");
        frame.focused = false;
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(24, 47)), BLACK, "Bar along the bottom edge");
        assert_eq!(display.get_pixel(Point::new(0, 24)), WHITE, "No side walls");
    }

    #[test]
    fn test_draw_circle_shape() {
        let style = StyleConfig { shape: ShapeVariant::Circle, ..test_style() };
        let mut frame = input(&style, "");
        frame.focused = false;
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(24, 0)), BLACK, "Top of the circle on the slot's first row");
        assert_eq!(display.get_pixel(Point::new(0, 24)), BLACK, "Left edge on the slot's first column");
        assert_eq!(display.get_pixel(Point::new(24, 47)), BLACK, "Bottom row stays inside the slot");
        assert_eq!(display.get_pixel(Point::new(47, 24)), BLACK, "Right column stays inside the slot");
        assert_eq!(display.get_pixel(Point::new(48, 24)), WHITE, "Nothing spills past the slot");
        assert_eq!(display.get_pixel(Point::new(1, 1)), WHITE, "Corner outside the circle");
    }

    #[test]
    fn test_circle_inscribed_in_slot_bounds() {
        let style = StyleConfig { shape: ShapeVariant::Circle, ..test_style() };
        let slot = slots(&style)[0];
        assert_eq!(
            inscribed_circle(&slot, &style).bounding_box(),
            Rectangle::new(Point::zero(), Size::new(48, 48)),
            "Circle covers exactly the slot's 48px square"
        );
    }

    #[test]
    fn test_draw_anchor_lines() {
        let style = test_style();
        let mut frame = input(&style, "");
        frame.focused = false;
        frame.anchor_lines = true;
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(10, 24)), GREEN, "Horizontal line through the center");
        assert_eq!(display.get_pixel(Point::new(24, 10)), GREEN, "Vertical line through the center");
        assert_eq!(display.get_pixel(Point::new(10, 10)), WHITE, "Off-axis pixels untouched");
        assert_eq!(display.get_pixel(Point::new(50, 24)), WHITE, "Lines stay inside the slot");
    }

    #[test]
    fn test_draw_background_fill() {
        let style = test_style();
        let mut frame = input(&style, "");
        frame.colors.background = Some(BLUE);
        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(183, 24)), BLUE, "Empty slot filled");
        assert_eq!(display.get_pixel(Point::new(50, 24)), WHITE, "Gap between slots untouched");
    }

    #[test]
    fn test_active_slot_uses_highlight_background() {
        let style = test_style();
        let mut frame = input(&style, "1");
        frame.colors.background = Some(BLUE);
        frame.colors.highlight_background = Some(GRAY);
        let plan = plan_frame(&slots(&style), &frame);
        assert_eq!(plan.slots[0].background, Some(BLUE), "Filled slot keeps the item background");
        assert_eq!(plan.slots[1].background, Some(GRAY), "Active slot uses the highlight background");

        let mut display = display();
        render(&mut display, &slots(&style), &frame);
        assert_eq!(display.get_pixel(Point::new(77, 10)), GRAY, "Active slot filled with highlight");
        assert_eq!(display.get_pixel(Point::new(130, 10)), BLUE);

        frame.focused = false;
        let plan = plan_frame(&slots(&style), &frame);
        assert_eq!(plan.slots[1].background, Some(BLUE), "No active slot without focus");
    }

    // -------------------------------------------------------------------------
    // Fault Isolation
    // -------------------------------------------------------------------------

    /// Display that refuses pixels in one column range.
    struct FailingDisplay {
        inner: SimulatorDisplay<Rgb565>,
        fail_x: core::ops::Range<i32>,
    }

    impl OriginDimensions for FailingDisplay {
        fn size(&self) -> Size {
            self.inner.size()
        }
    }

    impl DrawTarget for FailingDisplay {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if self.fail_x.contains(&point.x) {
                    return Err(());
                }
                self.inner.draw_iter([Pixel(point, color)]).ok();
            }
            Ok(())
        }
    }

    #[test]
    fn test_fault_in_one_slot_does_not_stop_others() {
        let style = test_style();
        let mut frame = input(&style, "");
        frame.focused = false;
        let mut target = FailingDisplay { inner: display(), fail_x: 53..101 };
        let stats = render(&mut target, &slots(&style), &frame);

        assert_eq!(stats.faults, 1, "Only slot 1 fails");
        assert_eq!(stats.slots_drawn, 3, "The other slots still draw");
        assert_eq!(target.inner.get_pixel(Point::new(106, 24)), BLACK, "Slot 2 drawn after the fault");
        assert_eq!(target.inner.get_pixel(Point::new(159, 24)), BLACK, "Slot 3 drawn after the fault");
    }
}

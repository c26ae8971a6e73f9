//! End-to-end widget behavior through the public API.

use std::{cell::RefCell, rc::Rc};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_graphics_simulator::SimulatorDisplay;
use pin_entry_view::{
    BlinkHandle,
    ManualScheduler,
    PinEntryView,
    PinViewConfig,
    ShapeVariant,
    StateOverrides,
    StyleConfig,
    VisualState,
    colors::{ACCENT, BLUE, ERROR_RED, GRAY, WHITE},
    config::{BLINK_INTERVAL, SHAKE_DURATION},
    geometry::{LayoutFrame, RoundedCorners, layout_slots, occupied_width},
    style::Padding,
};

/// Outer x range of each slot for the default style (48px slots, 5px gaps).
const SLOT_LEFT: [i32; 4] = [0, 53, 106, 159];
const SLOT_WIDTH: i32 = 48;

fn themed_view() -> (PinEntryView, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let mut view = PinEntryView::new(StyleConfig::default(), scheduler.clone());
    view.set_surface_color(WHITE);
    view.set_line_color(GRAY);
    view.set_highlight_line_color(Some(ACCENT));
    view.set_text_color(BLUE);
    (view, scheduler)
}

fn draw(view: &mut PinEntryView) -> SimulatorDisplay<Rgb565> {
    let mut display = SimulatorDisplay::new(view.size());
    display.clear(WHITE).unwrap();
    let stats = view.draw(&mut display);
    assert_eq!(stats.faults, 0, "Clean frame");
    display
}

/// Pixels of one color strictly inside slot `index` (outline excluded).
fn interior_count(display: &SimulatorDisplay<Rgb565>, index: usize, color: Rgb565) -> usize {
    let left = SLOT_LEFT[index];
    (left + 4..left + SLOT_WIDTH - 4)
        .flat_map(|x| (4..44).map(move |y| Point::new(x, y)))
        .filter(|&p| display.get_pixel(p) == color)
        .count()
}

fn interior_pixels(display: &SimulatorDisplay<Rgb565>, index: usize) -> Vec<Rgb565> {
    let left = SLOT_LEFT[index];
    (left + 4..left + SLOT_WIDTH - 4)
        .flat_map(|x| (4..44).map(move |y| Point::new(x, y)))
        .map(|p| display.get_pixel(p))
        .collect()
}

// -----------------------------------------------------------------------------
// Slot Rendering
// -----------------------------------------------------------------------------

#[test]
fn test_partial_input_shows_glyphs_and_active_slot() {
    let (mut view, _) = themed_view();
    view.set_focused(true);
    view.set_text("12");
    let display = draw(&mut view);

    assert!(interior_count(&display, 0, BLUE) > 0, "Slot 0 shows a glyph");
    assert!(interior_count(&display, 1, BLUE) > 0, "Slot 1 shows a glyph");
    assert_eq!(interior_count(&display, 2, BLUE), 0, "Active slot is empty");
    assert_eq!(interior_count(&display, 3, BLUE), 0, "Last slot is empty");

    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[2], 24)), ACCENT, "Active slot highlighted");
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[3], 24)), GRAY, "Plain slot uses the line color");
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[0], 24)), GRAY, "Filled slot uses the line color");
}

#[test]
fn test_unfocused_has_no_active_slot() {
    let (mut view, _) = themed_view();
    view.set_text("12");
    let display = draw(&mut view);
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[2], 24)), GRAY, "No highlight without focus");
}

#[test]
fn test_password_mode_draws_dots_only() {
    let (mut view, _) = themed_view();
    view.set_password_hidden(true);
    view.set_text("12");
    let masked_12 = draw(&mut view);

    view.set_text("78");
    let masked_78 = draw(&mut view);

    for slot in 0..2 {
        assert_eq!(
            masked_12.get_pixel(Point::new(SLOT_LEFT[slot] + 24, 24)),
            BLUE,
            "Dot centered in slot {slot}"
        );
        assert_eq!(
            interior_pixels(&masked_12, slot),
            interior_pixels(&masked_78, slot),
            "Slot {slot} looks the same whatever the digit"
        );
    }
    assert_eq!(interior_count(&masked_12, 2, BLUE), 0, "Empty slots stay empty");
}

#[test]
fn test_line_shape_has_no_second_highlight_pass() {
    // The extra highlight pass covers rectangles and circles only; the line
    // shape still recolors the active bar through its stroke color.
    let (mut view, _) = themed_view();
    view.set_shape(ShapeVariant::Line);
    view.set_focused(true);
    view.set_text("1");
    let display = draw(&mut view);
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[1] + 24, 47)), ACCENT, "Active bar highlighted");
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[2] + 24, 47)), GRAY);
}

#[test]
fn test_error_state_recolors_slots() {
    let (mut view, _) = themed_view();
    view.configure(
        VisualState::Error,
        StateOverrides { line_color: Some(ERROR_RED), text_color: Some(ERROR_RED), ..StateOverrides::error() },
    );
    view.set_text("12");
    view.set_error(true);
    let display = draw(&mut view);
    assert_eq!(display.get_pixel(Point::new(SLOT_LEFT[3], 24)), ERROR_RED, "Outline in error color");
    assert!(interior_count(&display, 0, ERROR_RED) > 0, "Glyph in error color");
    assert_eq!(interior_count(&display, 0, BLUE), 0, "Normal text color not used");
}

// -----------------------------------------------------------------------------
// Completion
// -----------------------------------------------------------------------------

#[test]
fn test_fourth_character_completes_once() {
    let (mut view, _) = themed_view();
    let codes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&codes);
    view.set_completion_handler(move |_view, code| sink.borrow_mut().push(code.to_owned()));

    for c in "123".chars() {
        view.insert(c);
    }
    assert!(codes.borrow().is_empty(), "Not complete after three");

    let outcome = view.insert('4').unwrap();
    assert_eq!(outcome.completed.as_deref(), Some("1234"));
    assert_eq!(*codes.borrow(), vec!["1234".to_owned()], "Exactly one completion");

    assert!(view.insert('5').is_none(), "Full buffer rejects input");
    assert_eq!(codes.borrow().len(), 1, "Rejected input does not complete again");
}

#[test]
fn test_shared_view_handler_sets_feedback() {
    let scheduler = ManualScheduler::new();
    let shared = PinEntryView::new(StyleConfig::default(), scheduler).into_shared();
    shared.borrow_mut().set_completion_handler(|view, code| {
        if code == "1234" {
            view.set_success(true);
        } else {
            view.set_error(true);
        }
    });

    for c in "1235".chars() {
        shared.borrow_mut().insert(c);
    }
    assert!(shared.borrow().is_in_state(VisualState::Error), "Wrong code flagged from the handler");

    shared.borrow_mut().backspace();
    assert!(shared.borrow().is_in_state(VisualState::Normal), "Deleting clears the feedback");
    shared.borrow_mut().insert('4');
    assert!(shared.borrow().is_in_state(VisualState::Success), "Right code flagged from the handler");
}

// -----------------------------------------------------------------------------
// Visual State
// -----------------------------------------------------------------------------

#[test]
fn test_shake_displaces_row_mid_animation() {
    let (mut view, _) = themed_view();
    view.configure(VisualState::Error, StateOverrides { line_color: Some(ERROR_RED), ..StateOverrides::error() });
    view.set_error(true);
    view.advance(SHAKE_DURATION / 7);

    let mut display = SimulatorDisplay::new(view.size());
    display.clear(WHITE).unwrap();
    view.draw(&mut display);

    assert_eq!(display.get_pixel(Point::new(0, 24)), WHITE, "Resting left edge vacated");
    assert!(
        (13..=17).any(|x| display.get_pixel(Point::new(x, 24)) == ERROR_RED),
        "Left edge moved about 15px right"
    );

    view.advance(SHAKE_DURATION);
    let display = draw(&mut view);
    assert_eq!(display.get_pixel(Point::new(0, 24)), ERROR_RED, "Row back at rest");
}

#[test]
fn test_error_twice_shakes_once() {
    let (mut view, _) = themed_view();
    view.configure(VisualState::Error, StateOverrides { line_color: Some(ERROR_RED), ..StateOverrides::error() });
    view.set_state(VisualState::Error);
    assert!(view.is_animating());

    // Let half of the shake play, then repeat the request.
    view.advance(SHAKE_DURATION / 2);
    view.set_state(VisualState::Error);
    view.advance(SHAKE_DURATION / 2);
    assert!(!view.is_animating(), "Second request did not restart the shake");
}

#[test]
fn test_states_are_exclusive() {
    let (mut view, _) = themed_view();
    view.set_state(VisualState::Success);
    assert!(view.is_in_state(VisualState::Success));
    assert!(!view.is_in_state(VisualState::Error));

    view.set_state(VisualState::Error);
    assert!(view.is_in_state(VisualState::Error));
    assert!(!view.is_in_state(VisualState::Success));
}

// -----------------------------------------------------------------------------
// Caret Blink
// -----------------------------------------------------------------------------

#[test]
fn test_caret_blinks_while_focused_and_stops_on_blur() {
    let scheduler = ManualScheduler::new();
    let view = PinEntryView::new(StyleConfig::default(), scheduler.clone()).into_shared();
    let blink = BlinkHandle::new(&view);
    view.borrow_mut().on_attached();
    view.borrow_mut().set_focused(true);

    let mut seen = Vec::new();
    for _ in 0..4 {
        scheduler.advance(BLINK_INTERVAL, |timer| {
            if timer == blink.timer() {
                blink.fire();
            }
        });
        seen.push(view.borrow().caret_visible());
    }
    assert_eq!(seen, vec![true, false, true, false], "Toggles once per interval");

    view.borrow_mut().set_focused(false);
    let mut fires = 0;
    scheduler.advance(BLINK_INTERVAL * 3, |timer| {
        if timer == blink.timer() {
            fires += 1;
            blink.fire();
        }
    });
    assert_eq!(fires, 0, "No fires after blur");
    assert!(!view.borrow().caret_visible(), "Caret left hidden");
}

#[test]
fn test_blink_after_view_dropped_is_noop() {
    let scheduler = ManualScheduler::new();
    let view = PinEntryView::new(StyleConfig::default(), scheduler.clone()).into_shared();
    let blink = BlinkHandle::new(&view);
    view.borrow_mut().set_focused(true);
    drop(view);

    assert_eq!(scheduler.pending_count(), 0, "Drop cancelled the timer");
    assert!(!blink.fire(), "Late fire is ignored");
}

// -----------------------------------------------------------------------------
// Geometry
// -----------------------------------------------------------------------------

#[test]
fn test_oversized_radius_clamps_to_half_width() {
    let (mut view, _) = themed_view();
    view.set_item_radius(100);
    assert_eq!(view.style().corner_radius, 24);
    assert!(
        view.event_log().last().is_some_and(|entry| entry.contains("clamped")),
        "Clamp visible in the event log"
    );
}

#[test]
fn test_occupied_width_matches_slot_edges() {
    for n in 1..=8 {
        for spacing in [0, 1, 5, 13] {
            let style = StyleConfig { slot_count: n, spacing, ..StyleConfig::default() };
            let slots = layout_slots(&style, &LayoutFrame::new(0.0, Padding::default()));
            let half = style.border_width as f32 / 2.0;
            let left = slots[0].border_rect.left - half;
            let right = slots[n - 1].border_rect.right + half;
            assert_eq!(right - left, occupied_width(&style), "n={n} spacing={spacing}");
        }
    }
}

#[test]
fn test_touching_slots_round_outer_corners_only() {
    let style = StyleConfig { slot_count: 4, spacing: 0, corner_radius: 8, ..StyleConfig::default() };
    let slots = layout_slots(&style, &LayoutFrame::new(300.0, Padding::default()));
    assert_eq!(slots[0].corners, RoundedCorners::sides(true, false));
    assert_eq!(slots[1].corners, RoundedCorners::NONE);
    assert_eq!(slots[2].corners, RoundedCorners::NONE);
    assert_eq!(slots[3].corners, RoundedCorners::sides(false, true));
}

// -----------------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------------

#[test]
fn test_config_file_drives_widget() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pin.toml");
    std::fs::write(
        &path,
        r##"
        shape = "circle"
        item_count = 6
        item_width = 32
        item_height = 32
        error_line_color = "#FF0000"
        error_shake = true
        "##,
    )
    .unwrap();

    let config = PinViewConfig::load(&path).unwrap();
    let (mut view, _) = themed_view();
    config.apply(&mut view).unwrap();

    assert_eq!(view.style().shape, ShapeVariant::Circle);
    assert_eq!(view.size(), Size::new(6 * 32 + 5 * 5, 32));

    view.set_error(true);
    assert!(view.is_animating(), "Configured error shakes");
}

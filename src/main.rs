// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Desktop simulator for the PIN entry widget.
//!
//! Opens an SDL window with one [`PinEntryView`] and a live event log.
//! An optional TOML file (first argument) configures the widget.
//!
//! # Controls
//!
//! | Key         | Action                                     |
//! |-------------|--------------------------------------------|
//! | `0`-`9`     | Type a digit                               |
//! | Backspace   | Delete the last digit                      |
//! | Escape      | Clear all digits                           |
//! | Tab         | Toggle focus                               |
//! | E / S / N   | Error / Success / Normal state             |
//! | P           | Toggle password masking                    |
//! | F1          | Next shape                                 |
//! | F2          | Next gravity                               |
//! | F3          | Toggle hide-line-when-filled               |
//! | F4          | Toggle anchor lines                        |
//!
//! Entering [`DEMO_CODE`] switches to Success; any other full code to Error.
//! Set `RUST_LOG=debug` (or `trace`) for more detail on stderr.

use std::{
    cell::RefCell,
    env,
    fmt::Write,
    rc::Rc,
    thread,
    time::Instant,
};

use anyhow::Context;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*, text::Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
    sdl2::Keycode,
};
use pin_entry_view::{
    BlinkHandle,
    ManualScheduler,
    MeasureSpec,
    PinEntryView,
    PinViewConfig,
    StateOverrides,
    StyleConfig,
    VisualState,
    colors::{ACCENT, ERROR_RED, ERROR_WASH, GRAY, LIGHT_GRAY, SUCCESS_GREEN, SUCCESS_WASH, WHITE},
    config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH, WIDGET_TOP},
    styles::{LEFT_TOP, LOG_STYLE, STATUS_STYLE},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Code accepted by the simulator.
const DEMO_CODE: &str = "1234";

/// Top of the event log area.
const LOG_TOP: i32 = 84;

/// Line height of the event log.
const LOG_LINE_HEIGHT: i32 = 12;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match env::args().nth(1) {
        Some(path) => PinViewConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => PinViewConfig::default(),
    };

    // ==========================================================================
    // Widget Setup
    // ==========================================================================

    let scheduler = ManualScheduler::new();
    let view = PinEntryView::new(StyleConfig::default(), scheduler.clone()).into_shared();
    {
        let mut view = view.borrow_mut();
        apply_demo_theme(&mut view);
        config.apply(&mut view).context("applying widget config")?;
        view.set_completion_handler(|view, code| {
            info!(len = code.len(), "code entered");
            if code == DEMO_CODE {
                view.set_success(true);
            } else {
                view.set_error(true);
            }
        });
        if view.on_attached() {
            view.set_focused(true);
        }
    }
    let blink = BlinkHandle::new(&view);

    // Initialize display and window
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("PIN Entry Sim", &output_settings);

    info!("simulator started");

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    view.borrow_mut().on_detached();
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    handle_key(&view, keycode);
                }
                _ => {}
            }
        }

        // Deliver blink fires. The view is not borrowed while the queue runs.
        scheduler.advance(FRAME_TIME, |timer| {
            if timer == blink.timer() {
                blink.fire();
            }
        });

        {
            let mut view = view.borrow_mut();
            view.advance(FRAME_TIME);

            let size = view.measure(MeasureSpec::Exactly(SCREEN_WIDTH), MeasureSpec::Unspecified);
            if view.size() != size {
                view.set_bounds(Some(size));
            }

            if view.needs_redraw() {
                display.clear(view.surface_color()).ok();
                draw_status(&mut display, &view);
                let stats = view.draw(&mut display.translated(Point::new(0, WIDGET_TOP)));
                if stats.faults > 0 {
                    tracing::warn!(faults = stats.faults, "slots failed to draw");
                }
                draw_log(&mut display, &view);
            }
        }

        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

/// Light theme with state colors and effects switched on.
fn apply_demo_theme(view: &mut PinEntryView) {
    view.set_surface_color(WHITE);
    view.set_line_color(GRAY);
    view.set_highlight_line_color(Some(ACCENT));
    view.set_hint(Some("0"));
    view.set_hint_color(LIGHT_GRAY);
    view.set_animation_enabled(true);
    view.configure(
        VisualState::Error,
        StateOverrides {
            line_color: Some(ERROR_RED),
            text_color: Some(ERROR_RED),
            background_color: Some(ERROR_WASH),
            ..StateOverrides::error()
        },
    );
    view.configure(
        VisualState::Success,
        StateOverrides {
            line_color: Some(SUCCESS_GREEN),
            text_color: Some(SUCCESS_GREEN),
            background_color: Some(SUCCESS_WASH),
            ..StateOverrides::success()
        },
    );
}

fn handle_key(view: &Rc<RefCell<PinEntryView>>, keycode: Keycode) {
    let mut view = view.borrow_mut();
    if let Some(c) = digit(keycode) {
        view.insert(c);
        return;
    }
    match keycode {
        Keycode::BACKSPACE => {
            view.backspace();
        }
        Keycode::ESCAPE => {
            view.clear_text();
        }
        Keycode::TAB => {
            let focused = view.is_focused();
            view.set_focused(!focused);
        }
        Keycode::E => view.set_state(VisualState::Error),
        Keycode::S => view.set_state(VisualState::Success),
        Keycode::N => view.set_state(VisualState::Normal),
        Keycode::P => {
            let hidden = view.is_password_hidden();
            view.set_password_hidden(!hidden);
        }
        Keycode::F1 => {
            let shape = view.style().shape.next();
            view.set_shape(shape);
        }
        Keycode::F2 => {
            let alignment = view.style().alignment.next();
            view.set_alignment(alignment);
        }
        Keycode::F3 => {
            let hide = !view.hides_line_when_filled();
            view.set_hide_line_when_filled(hide);
        }
        Keycode::F4 => {
            let enabled = !view.anchor_lines();
            view.set_anchor_lines(enabled);
        }
        _ => {}
    }
}

/// Digit typed by a number-row or keypad key.
fn digit(keycode: Keycode) -> Option<char> {
    let c = match keycode {
        Keycode::NUM_0 | Keycode::KP_0 => '0',
        Keycode::NUM_1 | Keycode::KP_1 => '1',
        Keycode::NUM_2 | Keycode::KP_2 => '2',
        Keycode::NUM_3 | Keycode::KP_3 => '3',
        Keycode::NUM_4 | Keycode::KP_4 => '4',
        Keycode::NUM_5 | Keycode::KP_5 => '5',
        Keycode::NUM_6 | Keycode::KP_6 => '6',
        Keycode::NUM_7 | Keycode::KP_7 => '7',
        Keycode::NUM_8 | Keycode::KP_8 => '8',
        Keycode::NUM_9 | Keycode::KP_9 => '9',
        _ => return None,
    };
    Some(c)
}

fn draw_status<D>(display: &mut D, view: &PinEntryView)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = view.style();
    let mut line: heapless::String<64> = heapless::String::new();
    write!(
        line,
        "{} | {} | {}",
        view.state().label(),
        style.shape.label(),
        style.alignment.label()
    )
    .ok();
    Text::with_text_style(&line, Point::new(4, 4), STATUS_STYLE, LEFT_TOP).draw(display).ok();
}

fn draw_log<D>(display: &mut D, view: &PinEntryView)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut y = LOG_TOP;
    for entry in view.event_log().iter() {
        Text::with_text_style(entry, Point::new(4, y), LOG_STYLE, LEFT_TOP).draw(display).ok();
        y += LOG_LINE_HEIGHT;
    }
}

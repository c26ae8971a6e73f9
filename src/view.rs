//! The widget: composition root for geometry, state, input and blink.
//!
//! [`PinEntryView`] owns every component and is what a host adapter talks
//! to. The adapter forwards text edits, focus, clicks, lifecycle changes and
//! timer fires; it polls [`PinEntryView::needs_redraw`] and calls
//! [`PinEntryView::draw`] with its display.
//!
//! # Sharing with the Scheduler
//!
//! Hosts usually keep the view in an `Rc<RefCell<_>>`. The blink timer is
//! delivered through a [`BlinkHandle`] holding only a `Weak` reference, so a
//! fire that arrives after the view is gone does nothing. A fire that
//! arrives while the view is borrowed is held and delivered by the next
//! [`PinEntryView::advance`].
//!
//! The completion handler receives the view itself, so it can react (set
//! Error, clear the text) without borrowing the shared cell again.
//!
//! ```ignore
//! let scheduler = ManualScheduler::new();
//! let view = PinEntryView::new(StyleConfig::default(), scheduler.clone()).into_shared();
//! let blink = BlinkHandle::new(&view);
//! scheduler.advance(FRAME_TIME, |timer| {
//!     if timer == blink.timer() {
//!         blink.fire();
//!     }
//! });
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use tracing::{debug, trace, warn};

use crate::{
    animations::{EntryAnimation, ShakeAnimation, SuccessPulse},
    blink::{CursorBlink, Scheduler, TimerId},
    colors::{BLACK, GRAY, WHITE},
    config::DEFAULT_CURSOR_WIDTH,
    coordinator::{ChangeOutcome, InputCoordinator},
    diagnostics::EventLog,
    geometry::{LayoutFrame, MeasureSpec, PointF, SlotGeometry, layout_slots, preferred_size},
    render::{EntryFrame, FrameInput, RenderColors, RenderStats, render},
    state::{StateDefaults, StateOverrides, VisualEffect, VisualState, VisualStateModel},
    style::{Alignment, Padding, ShapeVariant, StyleConfig},
    text::{InputType, PinBuffer, TextBuffer, TextChange, TransformationMethod},
};

/// Callback invoked with the view and the full text when every slot is filled.
pub type CompletionHandler = Box<dyn FnMut(&mut PinEntryView, &str)>;

/// Slot-based PIN/OTP entry widget.
pub struct PinEntryView {
    // Layout
    requested_style: StyleConfig,
    style: StyleConfig,
    padding: Padding,
    bounds: Option<Size>,
    scroll: PointF,
    geometry: Vec<SlotGeometry>,
    geometry_dirty: bool,

    // Components
    buffer: PinBuffer,
    coordinator: InputCoordinator,
    states: VisualStateModel,
    blink: CursorBlink,
    scheduler: Box<dyn Scheduler>,
    missed_blink: Rc<Cell<bool>>,
    completion: Option<CompletionHandler>,
    completion_generation: u32,

    // Appearance
    line_color: Rgb565,
    highlight_line_color: Option<Rgb565>,
    text_color: Rgb565,
    hint: Option<String>,
    hint_color: Rgb565,
    cursor_color: Option<Rgb565>,
    cursor_width: u32,
    cursor_visible: bool,
    item_background: Option<Rgb565>,
    highlight_item_background: Option<Rgb565>,
    surface_color: Rgb565,
    input_type: InputType,
    password_hidden: bool,
    hide_line_when_filled: bool,
    animation_enabled: bool,
    auto_focus: bool,
    anchor_lines: bool,

    // Runtime
    focused: bool,
    attached: bool,
    entry: EntryAnimation,
    shake: ShakeAnimation,
    pulse: SuccessPulse,
    redraw: bool,
    log: EventLog,
}

impl PinEntryView {
    pub fn new(style: StyleConfig, scheduler: impl Scheduler + 'static) -> Self {
        let mut view = Self {
            requested_style: style,
            style: style.normalized(),
            padding: Padding::default(),
            bounds: None,
            scroll: PointF::default(),
            geometry: Vec::new(),
            geometry_dirty: true,

            buffer: PinBuffer::new(style.slot_count),
            coordinator: InputCoordinator::new(),
            states: VisualStateModel::default(),
            blink: CursorBlink::new(),
            scheduler: Box::new(scheduler),
            missed_blink: Rc::new(Cell::new(false)),
            completion: None,
            completion_generation: 0,

            line_color: BLACK,
            highlight_line_color: None,
            text_color: BLACK,
            hint: None,
            hint_color: GRAY,
            cursor_color: None,
            cursor_width: DEFAULT_CURSOR_WIDTH,
            cursor_visible: true,
            item_background: None,
            highlight_item_background: None,
            surface_color: WHITE,
            input_type: InputType::Number,
            password_hidden: false,
            hide_line_when_filled: false,
            animation_enabled: false,
            auto_focus: true,
            anchor_lines: false,

            focused: false,
            attached: false,
            entry: EntryAnimation::new(),
            shake: ShakeAnimation::new(),
            pulse: SuccessPulse::new(),
            redraw: true,
            log: EventLog::new(),
        };
        view.sync_state_defaults();
        view
    }

    /// Wrap for sharing with a [`BlinkHandle`].
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Entered text.
    #[inline]
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Text as drawn (after the transformation, if any).
    #[inline]
    pub fn display_text(&self) -> &str {
        self.coordinator.display_text()
    }

    #[inline]
    pub fn text_len(&self) -> usize {
        self.buffer.char_len()
    }

    /// Caret position. Always the end of the text after any change.
    #[inline]
    pub fn selection(&self) -> usize {
        self.buffer.selection()
    }

    /// Type one character. `None` when every slot is already filled.
    pub fn insert(&mut self, c: char) -> Option<ChangeOutcome> {
        let change = self.buffer.insert(c)?;
        Some(self.on_text_changed(change))
    }

    /// Delete the last character. `None` when empty.
    pub fn backspace(&mut self) -> Option<ChangeOutcome> {
        let change = self.buffer.delete_backward()?;
        Some(self.on_text_changed(change))
    }

    /// Replace the whole text, keeping at most one character per slot.
    pub fn set_text(&mut self, text: &str) -> ChangeOutcome {
        let change = self.buffer.replace_all(text);
        self.on_text_changed(change)
    }

    pub fn clear_text(&mut self) -> ChangeOutcome {
        self.set_text("")
    }

    /// Host moved the caret. It is pinned back to the end of the text.
    pub fn on_selection_changed(&mut self, requested: usize) {
        if self.coordinator.on_selection_changed(&mut self.buffer, requested) {
            trace!(requested, "caret pinned to end");
        }
    }

    /// Register the completion handler, replacing any previous one.
    ///
    /// The handler runs after the change is fully applied and may mutate the
    /// view, including replacing or clearing itself.
    pub fn set_completion_handler(&mut self, handler: impl FnMut(&mut Self, &str) + 'static) {
        self.completion = Some(Box::new(handler));
        self.completion_generation = self.completion_generation.wrapping_add(1);
    }

    pub fn clear_completion_handler(&mut self) {
        self.completion = None;
        self.completion_generation = self.completion_generation.wrapping_add(1);
    }

    #[inline]
    pub fn has_completion_handler(&self) -> bool {
        self.completion.is_some()
    }

    fn on_text_changed(&mut self, change: TextChange) -> ChangeOutcome {
        let outcome = self.coordinator.on_text_changed(
            &mut self.buffer,
            &mut self.states,
            change,
            self.style.slot_count,
            self.animation_enabled,
        );
        if outcome.feedback_cleared {
            self.log.push("feedback cleared");
        }
        self.make_blink();
        if outcome.restart_entry {
            self.entry.restart();
        }
        self.invalidate();
        if let Some(code) = &outcome.completed {
            self.log.push_fmt(format_args!("complete ({} chars)", self.text_len()));
            self.notify_completion(code);
        }
        outcome
    }

    /// Run the handler with the view unborrowed by it. A handler set or
    /// cleared from inside the callback wins over the one being run.
    fn notify_completion(&mut self, code: &str) {
        let Some(mut handler) = self.completion.take() else {
            return;
        };
        let generation = self.completion_generation;
        handler(self, code);
        if self.completion_generation == generation {
            self.completion = Some(handler);
        }
    }

    // =========================================================================
    // Visual State
    // =========================================================================

    #[inline]
    pub const fn state(&self) -> VisualState {
        self.states.current()
    }

    #[inline]
    pub fn is_in_state(&self, state: VisualState) -> bool {
        self.states.is_in_state(state)
    }

    /// Switch visual state, playing the shake or pulse if configured.
    pub fn set_state(&mut self, state: VisualState) {
        let previous = self.states.current();
        let effect = self.states.set_state(state);
        self.after_state_change(previous, effect);
    }

    /// `true` enters Error, `false` leaves it (only when in Error).
    pub fn set_error(&mut self, on: bool) {
        let previous = self.states.current();
        let effect = self.states.set_error(on);
        self.after_state_change(previous, effect);
    }

    /// `true` enters Success, `false` leaves it (only when in Success).
    pub fn set_success(&mut self, on: bool) {
        let previous = self.states.current();
        let effect = self.states.set_success(on);
        self.after_state_change(previous, effect);
    }

    fn after_state_change(&mut self, previous: VisualState, effect: Option<VisualEffect>) {
        let current = self.states.current();
        if current == previous {
            return;
        }
        match effect {
            Some(VisualEffect::Shake) => self.shake.start(),
            Some(VisualEffect::SuccessPulse) => self.pulse.start(),
            None => {}
        }
        self.log.push_fmt(format_args!("state: {}", current.label()));
        self.invalidate();
    }

    /// Replace one state's overrides.
    pub fn configure(&mut self, state: VisualState, overrides: StateOverrides) {
        self.states.configure(state, overrides);
        self.invalidate();
    }

    pub fn state_overrides(&self, state: VisualState) -> StateOverrides {
        *self.states.overrides(state)
    }

    fn sync_state_defaults(&mut self) {
        self.states.update_defaults(StateDefaults {
            line_color: self.line_color,
            text_color: self.text_color,
            background_color: self.item_background,
        });
    }

    // =========================================================================
    // Focus, Click, Lifecycle
    // =========================================================================

    #[inline]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Focus signal from the host.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            self.auto_focus = true;
            let len = self.buffer.char_len();
            self.buffer.set_selection(len);
        }
        debug!(focused, "focus changed");
        self.make_blink();
        self.invalidate();
    }

    /// Click on the widget. Returns `true` when the host should request
    /// focus (and show its keyboard).
    pub fn on_click(&mut self) -> bool {
        self.auto_focus = true;
        true
    }

    /// Attached to a window. Returns `true` when the host should request
    /// focus because auto-focus is on.
    pub fn on_attached(&mut self) -> bool {
        self.attached = true;
        let should_blink = self.should_blink();
        if self.blink.resume(should_blink, &mut *self.scheduler) {
            self.invalidate();
        }
        self.auto_focus && !self.focused
    }

    pub fn on_detached(&mut self) {
        self.attached = false;
        if self.blink.suspend(&mut *self.scheduler) {
            self.invalidate();
        }
    }

    /// Screen power change. Blinking pauses while the screen is off.
    pub fn on_screen_state(&mut self, screen_on: bool) {
        let changed = if screen_on {
            let should_blink = self.should_blink();
            self.blink.resume(should_blink, &mut *self.scheduler)
        } else {
            self.blink.suspend(&mut *self.scheduler)
        };
        if changed {
            self.invalidate();
        }
    }

    #[inline]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    // =========================================================================
    // Caret
    // =========================================================================

    #[inline]
    fn should_blink(&self) -> bool {
        self.cursor_visible && self.focused
    }

    fn make_blink(&mut self) {
        let should_blink = self.should_blink();
        if self.blink.make_blink(should_blink, &mut *self.scheduler) {
            self.invalidate();
        }
    }

    /// Timer id the blink schedules; hosts route fires of this id to
    /// [`Self::on_blink_timer`].
    #[inline]
    pub const fn blink_timer(&self) -> TimerId {
        self.blink.timer()
    }

    /// Blink fire from the host scheduler. Returns `true` when the caret
    /// toggled or was hidden.
    pub fn on_blink_timer(&mut self) -> bool {
        let should_blink = self.should_blink();
        let changed = self.blink.fire(should_blink, &mut *self.scheduler);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Whether the caret is drawn this frame.
    #[inline]
    pub const fn caret_visible(&self) -> bool {
        self.blink.visible()
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.cursor_visible = visible;
            self.make_blink();
            self.invalidate();
        }
    }

    #[inline]
    pub const fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_color(&mut self, color: Rgb565) {
        self.cursor_color = Some(color);
        self.invalidate();
    }

    pub fn set_cursor_width(&mut self, width: u32) {
        self.cursor_width = width;
        self.invalidate();
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Effective (normalized) style.
    #[inline]
    pub const fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Change geometry-affecting style values. Geometry is recomputed before
    /// the next draw.
    pub fn update_style(&mut self, update: impl FnOnce(&mut StyleConfig)) {
        let previous_count = self.style.slot_count;
        let previous_radius = (self.requested_style.corner_radius, self.style.corner_radius);
        update(&mut self.requested_style);
        self.style = self.requested_style.normalized();
        self.geometry_dirty = true;

        let radius = (self.requested_style.corner_radius, self.style.corner_radius);
        if radius.0 != radius.1 && radius != previous_radius {
            self.log.push_fmt(format_args!("radius {} clamped to {}", radius.0, radius.1));
        }

        if self.style.slot_count != previous_count
            && let Some(change) = self.buffer.set_max_len(self.style.slot_count)
        {
            warn!(slots = self.style.slot_count, "slot count shrank below text length, truncating");
            self.log.push_fmt(format_args!("text truncated to {} slots", self.style.slot_count));
            self.on_text_changed(change);
        }
        self.invalidate();
    }

    /// Record a configuration event in the on-screen log.
    pub(crate) fn record(&mut self, args: fmt::Arguments<'_>) {
        self.log.push_fmt(args);
    }

    pub fn set_item_count(&mut self, count: usize) {
        self.update_style(|s| s.slot_count = count);
    }

    pub fn set_item_width(&mut self, width: u32) {
        self.update_style(|s| s.slot_width = width);
    }

    pub fn set_item_height(&mut self, height: u32) {
        self.update_style(|s| s.slot_height = height);
    }

    pub fn set_item_spacing(&mut self, spacing: u32) {
        self.update_style(|s| s.spacing = spacing);
    }

    pub fn set_item_radius(&mut self, radius: u32) {
        self.update_style(|s| s.corner_radius = radius);
    }

    pub fn set_line_width(&mut self, width: u32) {
        self.update_style(|s| s.border_width = width);
    }

    pub fn set_text_size(&mut self, size: u32) {
        self.update_style(|s| s.text_size = size);
    }

    pub fn set_shape(&mut self, shape: ShapeVariant) {
        self.update_style(|s| s.shape = shape);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.update_style(|s| s.alignment = alignment);
    }

    // =========================================================================
    // Colors and Flags
    // =========================================================================

    pub fn set_line_color(&mut self, color: Rgb565) {
        self.line_color = color;
        self.sync_state_defaults();
        self.invalidate();
    }

    /// Outline color of the active slot. `None` uses the line color.
    pub fn set_highlight_line_color(&mut self, color: Option<Rgb565>) {
        self.highlight_line_color = color;
        self.invalidate();
    }

    /// Text color. The caret follows it unless a cursor color was set.
    pub fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
        self.sync_state_defaults();
        self.invalidate();
    }

    pub fn set_hint(&mut self, hint: Option<&str>) {
        self.hint = hint.map(str::to_owned);
        self.invalidate();
    }

    pub fn set_hint_color(&mut self, color: Rgb565) {
        self.hint_color = color;
        self.invalidate();
    }

    /// Fill behind each slot in the Normal state.
    pub fn set_item_background(&mut self, color: Option<Rgb565>) {
        self.item_background = color;
        self.sync_state_defaults();
        self.invalidate();
    }

    /// Fill behind the active slot. `None` uses the item background.
    pub fn set_highlight_item_background(&mut self, color: Option<Rgb565>) {
        self.highlight_item_background = color;
        self.invalidate();
    }

    /// Color of the surface the widget is drawn on.
    pub fn set_surface_color(&mut self, color: Rgb565) {
        self.surface_color = color;
        self.invalidate();
    }

    #[inline]
    pub const fn surface_color(&self) -> Rgb565 {
        self.surface_color
    }

    /// Set the keyboard class. Password classes hide characters.
    pub fn set_input_type(&mut self, input_type: InputType) {
        self.input_type = input_type;
        self.set_password_hidden(input_type.is_password());
    }

    #[inline]
    pub const fn input_type(&self) -> InputType {
        self.input_type
    }

    /// Draw filled slots as dots (unless a transformation is attached).
    pub fn set_password_hidden(&mut self, hidden: bool) {
        self.password_hidden = hidden;
        self.coordinator.refresh_display(self.buffer.text());
        self.invalidate();
    }

    #[inline]
    pub const fn is_password_hidden(&self) -> bool {
        self.password_hidden
    }

    /// Attach or remove a display transformation.
    pub fn set_transformation(&mut self, transformation: Option<Box<dyn TransformationMethod>>) {
        self.coordinator.set_transformation(transformation);
        self.coordinator.refresh_display(self.buffer.text());
        self.invalidate();
    }

    pub fn set_hide_line_when_filled(&mut self, hide: bool) {
        self.hide_line_when_filled = hide;
        self.invalidate();
    }

    #[inline]
    pub const fn hides_line_when_filled(&self) -> bool {
        self.hide_line_when_filled
    }

    /// Entry animation for typed characters.
    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.animation_enabled = enabled;
        if !enabled {
            self.entry = EntryAnimation::new();
        }
    }

    pub fn set_auto_focus(&mut self, auto_focus: bool) {
        self.auto_focus = auto_focus;
    }

    #[inline]
    pub const fn is_auto_focus(&self) -> bool {
        self.auto_focus
    }

    /// Debug crosshairs through every slot center.
    pub fn set_anchor_lines(&mut self, enabled: bool) {
        self.anchor_lines = enabled;
        self.invalidate();
    }

    #[inline]
    pub const fn anchor_lines(&self) -> bool {
        self.anchor_lines
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Size assigned by the host. `None` wraps the slot row.
    pub fn set_bounds(&mut self, bounds: Option<Size>) {
        self.bounds = bounds;
        self.geometry_dirty = true;
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.geometry_dirty = true;
        self.invalidate();
    }

    pub fn set_scroll(&mut self, scroll: PointF) {
        self.scroll = scroll;
        self.geometry_dirty = true;
        self.invalidate();
    }

    /// Preferred size under the host's constraints.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        preferred_size(&self.style, &self.padding, width, height)
    }

    /// Current widget size.
    pub fn size(&self) -> Size {
        self.bounds
            .unwrap_or_else(|| self.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified))
    }

    /// Slot geometry, recomputed if layout or style changed.
    pub fn geometry(&mut self) -> &[SlotGeometry] {
        if self.geometry_dirty {
            let mut frame = LayoutFrame::new(self.size().width as f32, self.padding);
            frame.scroll = self.scroll;
            self.geometry = layout_slots(&self.style, &frame);
            self.geometry_dirty = false;
            trace!(slots = self.geometry.len(), "geometry recomputed");
        }
        &self.geometry
    }

    // =========================================================================
    // Animation and Drawing
    // =========================================================================

    /// Advance running animations. Returns `true` while any is running.
    ///
    /// Also delivers a blink fire that arrived while the view was borrowed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.missed_blink.replace(false) {
            debug!("delivering blink fire missed while the view was borrowed");
            self.on_blink_timer();
        }
        let was_running = self.is_animating();
        self.entry.advance(dt);
        self.shake.advance(dt);
        self.pulse.advance(dt);
        if was_running {
            self.invalidate();
        }
        self.is_animating()
    }

    pub const fn is_animating(&self) -> bool {
        self.entry.is_running() || self.shake.is_running() || self.pulse.is_running()
    }

    #[inline]
    fn invalidate(&mut self) {
        self.redraw = true;
    }

    #[inline]
    pub const fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Draw every slot. The caller clears the area first if needed.
    pub fn draw<D>(&mut self, display: &mut D) -> RenderStats
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let geometry = self.animated_geometry();
        let colors = self.render_colors();
        let input = FrameInput {
            style: &self.style,
            display_text: self.coordinator.display_text(),
            text_len: self.buffer.char_len(),
            hint: self.hint.as_deref(),
            focused: self.focused,
            caret_visible: self.blink.visible(),
            cursor_width: self.cursor_width,
            mask_characters: self.password_hidden && !self.coordinator.has_transformation(),
            hide_line_when_filled: self.hide_line_when_filled,
            colors,
            entry: self.entry.is_running().then(|| EntryFrame { scale: self.entry.scale(), alpha: self.entry.alpha() }),
            anchor_lines: self.anchor_lines,
        };
        let stats = render(display, &geometry, &input);
        self.redraw = false;
        stats
    }

    /// Geometry with the shake offset and pulse scale applied.
    fn animated_geometry(&mut self) -> Vec<SlotGeometry> {
        let dx = self.shake.offset();
        let scale = self.pulse.scale();
        let slots = self.geometry();
        let (Some(first), Some(last)) = (slots.first(), slots.last()) else {
            return Vec::new();
        };
        let origin = PointF::new((first.center.x + last.center.x) / 2.0, first.center.y);
        slots
            .iter()
            .map(|slot| {
                let slot = if scale == 1.0 { *slot } else { slot.scaled_about(origin, scale) };
                if dx == 0.0 { slot } else { slot.translated(dx) }
            })
            .collect()
    }

    fn render_colors(&self) -> RenderColors {
        let line = self.states.active_line_color();
        let state_line = self.states.overrides(self.states.current()).line_color;
        let highlight_line = match (self.states.current(), state_line) {
            (VisualState::Normal, _) | (_, None) => self.highlight_line_color.unwrap_or(line),
            (_, Some(color)) => color,
        };
        let state_background = self.states.overrides(self.states.current()).background_color;
        let highlight_background = match (self.states.current(), state_background) {
            (VisualState::Normal, _) | (_, None) => self.highlight_item_background,
            (_, Some(color)) => Some(color),
        };
        RenderColors {
            line,
            highlight_line,
            text: self.states.active_text_color(),
            hint: self.hint_color,
            cursor: self.cursor_color.unwrap_or(self.text_color),
            background: self.states.active_background_color(),
            highlight_background,
            surface: self.surface_color,
        }
    }

    /// Recent events for display.
    #[inline]
    pub const fn event_log(&self) -> &EventLog {
        &self.log
    }
}

impl Drop for PinEntryView {
    fn drop(&mut self) {
        self.scheduler.cancel(self.blink.timer());
    }
}

impl fmt::Debug for PinEntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinEntryView")
            .field("style", &self.style)
            .field("text_len", &self.buffer.char_len())
            .field("state", &self.states.current())
            .field("focused", &self.focused)
            .field("caret_visible", &self.blink.visible())
            .field("has_completion", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Blink Handle
// =============================================================================

/// Weak link from the host scheduler to a shared view.
#[derive(Clone, Debug)]
pub struct BlinkHandle {
    view: Weak<RefCell<PinEntryView>>,
    missed: Rc<Cell<bool>>,
    timer: TimerId,
}

impl BlinkHandle {
    pub fn new(view: &Rc<RefCell<PinEntryView>>) -> Self {
        let (timer, missed) = {
            let view = view.borrow();
            (view.blink_timer(), Rc::clone(&view.missed_blink))
        };
        Self { view: Rc::downgrade(view), missed, timer }
    }

    #[inline]
    pub const fn timer(&self) -> TimerId {
        self.timer
    }

    /// Deliver a fire. Does nothing if the view was dropped. If the view is
    /// borrowed the fire is held for its next [`PinEntryView::advance`].
    pub fn fire(&self) -> bool {
        let Some(shared) = self.view.upgrade() else {
            trace!(timer = self.timer.raw(), "blink fired after the view was dropped");
            return false;
        };
        let Ok(mut view) = shared.try_borrow_mut() else {
            debug!(timer = self.timer.raw(), "view busy, blink fire deferred");
            self.missed.set(true);
            return false;
        };
        view.on_blink_timer()
    }
}

//! Visual state model: Normal, Error and Success.
//!
//! Exactly one state is current. Each state carries its own optional color
//! overrides; anything left unset falls back to the view-level defaults,
//! which track the base style as it changes.
//!
//! # Transitions
//!
//! | Call | Effect |
//! |------|--------|
//! | `set_state(Error)` | Success cleared; shake if enabled and an error line color is set |
//! | `set_state(Success)` | Error cleared; pulse if the success animation is enabled |
//! | `set_state(Normal)` | both cleared |
//! | `set_state(current)` | nothing, no effect re-triggered |
//!
//! The model never plays animations itself. [`VisualStateModel::set_state`]
//! returns the [`VisualEffect`] to start and the view owns the playback.

use embedded_graphics::pixelcolor::Rgb565;
use tracing::debug;

use crate::colors::BLACK;

/// Feedback state of the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualState {
    #[default]
    Normal,
    Error,
    Success,
}

impl VisualState {
    const fn slot(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Error => 1,
            Self::Success => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

/// Per-state configuration. `None` colors fall back to the view defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateOverrides {
    pub line_color: Option<Rgb565>,
    pub text_color: Option<Rgb565>,
    pub background_color: Option<Rgb565>,
    /// Play the scale pulse when entering this state (Success only).
    pub animation_enabled: bool,
    /// Play the shake when entering this state (Error only).
    pub shake_enabled: bool,
}

impl StateOverrides {
    /// Error defaults: shake on, colors unset.
    pub const fn error() -> Self {
        Self {
            line_color: None,
            text_color: None,
            background_color: None,
            animation_enabled: false,
            shake_enabled: true,
        }
    }

    /// Success defaults: pulse on, colors unset.
    pub const fn success() -> Self {
        Self {
            line_color: None,
            text_color: None,
            background_color: None,
            animation_enabled: true,
            shake_enabled: false,
        }
    }
}

/// Base colors the overrides fall back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateDefaults {
    pub line_color: Rgb565,
    pub text_color: Rgb565,
    /// `None` leaves the slot background untouched.
    pub background_color: Option<Rgb565>,
}

impl Default for StateDefaults {
    fn default() -> Self {
        Self { line_color: BLACK, text_color: BLACK, background_color: None }
    }
}

/// One-shot animation requested by a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualEffect {
    /// Horizontal shake of the whole row.
    Shake,
    /// Scale pulse of the whole row.
    SuccessPulse,
}

// =============================================================================
// Model
// =============================================================================

/// Current visual state plus per-state overrides.
#[derive(Clone, Debug)]
pub struct VisualStateModel {
    current: VisualState,
    overrides: [StateOverrides; 3],
    defaults: StateDefaults,
}

impl VisualStateModel {
    pub fn new(defaults: StateDefaults) -> Self {
        Self {
            current: VisualState::Normal,
            overrides: [StateOverrides::default(), StateOverrides::error(), StateOverrides::success()],
            defaults,
        }
    }

    #[inline]
    pub const fn current(&self) -> VisualState {
        self.current
    }

    #[inline]
    pub fn is_in_state(&self, state: VisualState) -> bool {
        self.current == state
    }

    /// Switch state. Returns the effect to play, if any.
    ///
    /// Setting the current state again is a no-op and never re-triggers an
    /// effect.
    pub fn set_state(&mut self, state: VisualState) -> Option<VisualEffect> {
        if self.current == state {
            return None;
        }
        debug!(from = self.current.label(), to = state.label(), "visual state change");
        self.current = state;

        let overrides = self.overrides[state.slot()];
        match state {
            VisualState::Error if overrides.shake_enabled && overrides.line_color.is_some() => {
                Some(VisualEffect::Shake)
            }
            VisualState::Success if overrides.animation_enabled => Some(VisualEffect::SuccessPulse),
            _ => None,
        }
    }

    /// `true` enters Error; `false` returns to Normal only from Error.
    pub fn set_error(&mut self, on: bool) -> Option<VisualEffect> {
        self.toggle(VisualState::Error, on)
    }

    /// `true` enters Success; `false` returns to Normal only from Success.
    pub fn set_success(&mut self, on: bool) -> Option<VisualEffect> {
        self.toggle(VisualState::Success, on)
    }

    fn toggle(&mut self, state: VisualState, on: bool) -> Option<VisualEffect> {
        if on {
            self.set_state(state)
        } else if self.current == state {
            self.set_state(VisualState::Normal)
        } else {
            None
        }
    }

    /// Replace the overrides of one state. Takes effect on the next render.
    pub fn configure(&mut self, state: VisualState, overrides: StateOverrides) {
        self.overrides[state.slot()] = overrides;
    }

    /// Mutable access to one state's overrides for incremental edits.
    pub fn overrides_mut(&mut self, state: VisualState) -> &mut StateOverrides {
        &mut self.overrides[state.slot()]
    }

    pub fn overrides(&self, state: VisualState) -> &StateOverrides {
        &self.overrides[state.slot()]
    }

    /// Refresh the fallback colors after a base style change.
    pub fn update_defaults(&mut self, defaults: StateDefaults) {
        self.defaults = defaults;
    }

    #[inline]
    pub const fn defaults(&self) -> &StateDefaults {
        &self.defaults
    }

    // -------------------------------------------------------------------------
    // Active Colors
    // -------------------------------------------------------------------------

    #[inline]
    fn active(&self) -> &StateOverrides {
        &self.overrides[self.current.slot()]
    }

    pub fn active_line_color(&self) -> Rgb565 {
        self.active().line_color.unwrap_or(self.defaults.line_color)
    }

    pub fn active_text_color(&self) -> Rgb565 {
        self.active().text_color.unwrap_or(self.defaults.text_color)
    }

    pub fn active_background_color(&self) -> Option<Rgb565> {
        self.active().background_color.or(self.defaults.background_color)
    }
}

impl Default for VisualStateModel {
    fn default() -> Self {
        Self::new(StateDefaults::default())
    }
}

//! Animation effects for input and state feedback.
//!
//! - **Entry**: the most recently typed character grows from half size and
//!   fades in over 150 ms with a decelerating curve.
//! - **Shake**: the whole row slides left and right when entering the error
//!   state, following fixed keyframes over 700 ms.
//! - **Success pulse**: the row scales up by 5% and back over 500 ms.
//!
//! All animations are driven by elapsed time passed to `advance`, never by
//! wall-clock reads, so tests step them deterministically.
//!
//! # Alpha
//!
//! Rgb565 has no alpha channel. Fading is done by blending the glyph color
//! toward the slot's backdrop with [`lerp_rgb565`].

use std::time::Duration;

use embedded_graphics::{pixelcolor::Rgb565, prelude::IntoStorage};

use crate::config::{ENTRY_ANIMATION_DURATION, SHAKE_DURATION, SUCCESS_PULSE_DURATION};

// =============================================================================
// Constants
// =============================================================================

/// Starting scale of a freshly typed character.
const ENTRY_START_SCALE: f32 = 0.5;

/// Horizontal shake keyframes in pixels, evenly spaced over `SHAKE_DURATION`.
const SHAKE_KEYFRAMES: [f32; 8] = [0.0, 15.0, -15.0, 15.0, -15.0, 8.0, -8.0, 0.0];

/// Peak scale of the success pulse.
const PULSE_PEAK_SCALE: f32 = 1.05;

// =============================================================================
// Timeline
// =============================================================================

/// Elapsed-time tracker for a one-shot animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    duration: Duration,
    elapsed: Option<Duration>,
}

impl Timeline {
    pub const fn new(duration: Duration) -> Self {
        Self { duration, elapsed: None }
    }

    /// Start from the beginning, cancelling any run in progress.
    #[inline]
    pub const fn restart(&mut self) {
        self.elapsed = Some(Duration::ZERO);
    }

    /// Jump to the end state.
    #[inline]
    pub const fn finish(&mut self) {
        self.elapsed = None;
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Advance by `dt`. Returns `true` while the animation is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if let Some(elapsed) = self.elapsed {
            let next = elapsed + dt;
            self.elapsed = if next >= self.duration { None } else { Some(next) };
        }
        self.is_running()
    }

    /// Linear progress in `[0, 1]`. A finished timeline reports `1.0`.
    pub fn progress(&self) -> f32 {
        match self.elapsed {
            Some(elapsed) if !self.duration.is_zero() => {
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }
}

/// Decelerate interpolator: fast start, slow finish.
#[inline]
pub fn decelerate(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

// =============================================================================
// Entry Animation
// =============================================================================

/// Scale and fade-in of the last typed character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryAnimation {
    timeline: Timeline,
}

impl EntryAnimation {
    pub const fn new() -> Self {
        Self { timeline: Timeline::new(ENTRY_ANIMATION_DURATION) }
    }

    /// Restart from half size. A run in progress is ended first.
    pub const fn restart(&mut self) {
        self.timeline.finish();
        self.timeline.restart();
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.timeline.advance(dt)
    }

    /// Current scale factor in `[0.5, 1.0]`.
    pub fn scale(&self) -> f32 {
        let eased = decelerate(self.timeline.progress());
        ENTRY_START_SCALE + (1.0 - ENTRY_START_SCALE) * eased
    }

    /// Current opacity in `[0, 255]`, proportional to the scale.
    pub fn alpha(&self) -> u8 {
        (255.0 * self.scale()).round().clamp(0.0, 255.0) as u8
    }
}

impl Default for EntryAnimation {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Shake
// =============================================================================

/// Horizontal shake played on entering the error state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShakeAnimation {
    timeline: Timeline,
}

impl ShakeAnimation {
    pub const fn new() -> Self {
        Self { timeline: Timeline::new(SHAKE_DURATION) }
    }

    pub const fn start(&mut self) {
        self.timeline.restart();
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.timeline.advance(dt)
    }

    /// Current horizontal offset in pixels, interpolated between keyframes.
    pub fn offset(&self) -> f32 {
        if !self.is_running() {
            return 0.0;
        }
        let segments = (SHAKE_KEYFRAMES.len() - 1) as f32;
        let position = self.timeline.progress() * segments;
        let index = (position.floor() as usize).min(SHAKE_KEYFRAMES.len() - 2);
        let local = position - index as f32;
        let from = SHAKE_KEYFRAMES[index];
        let to = SHAKE_KEYFRAMES[index + 1];
        from + (to - from) * local
    }
}

impl Default for ShakeAnimation {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Success Pulse
// =============================================================================

/// Scale pulse played on entering the success state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuccessPulse {
    timeline: Timeline,
}

impl SuccessPulse {
    pub const fn new() -> Self {
        Self { timeline: Timeline::new(SUCCESS_PULSE_DURATION) }
    }

    pub const fn start(&mut self) {
        self.timeline.restart();
    }

    #[inline]
    pub const fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.timeline.advance(dt)
    }

    /// Current scale: up to the peak over the first half, back over the second.
    pub fn scale(&self) -> f32 {
        if !self.is_running() {
            return 1.0;
        }
        let t = self.timeline.progress();
        let ramp = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        1.0 + (PULSE_PEAK_SCALE - 1.0) * ramp
    }
}

impl Default for SuccessPulse {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Color Interpolation
// =============================================================================

/// Linear interpolation between two Rgb565 colors.
///
/// Works on the raw 5-6-5 channels with 8-bit fixed-point weights. `t = 0`
/// returns `from`, `t = 1` returns `to` exactly.
pub fn lerp_rgb565(from: Rgb565, to: Rgb565, t: f32) -> Rgb565 {
    let from_raw = from.into_storage();
    let to_raw = to.into_storage();

    let channels = |raw: u16| {
        (
            i32::from((raw >> 11) & 0x1F),
            i32::from((raw >> 5) & 0x3F),
            i32::from(raw & 0x1F),
        )
    };
    let (from_r, from_g, from_b) = channels(from_raw);
    let (to_r, to_g, to_b) = channels(to_raw);

    let t_fixed = (t.clamp(0.0, 1.0) * 256.0) as i32;
    let mix = |a: i32, b: i32| a + (((b - a) * t_fixed) >> 8);

    let r = mix(from_r, to_r).clamp(0, 31);
    let g = mix(from_g, to_g).clamp(0, 63);
    let b = mix(from_b, to_b).clamp(0, 31);

    Rgb565::new(r as u8, g as u8, b as u8)
}

/// Blend `color` over `backdrop` with an 8-bit opacity.
#[inline]
pub fn fade(color: Rgb565, backdrop: Rgb565, alpha: u8) -> Rgb565 {
    lerp_rgb565(backdrop, color, f32::from(alpha) / 255.0)
}

// =============================================================================
// Unit Tests
// =============================================================================

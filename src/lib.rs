// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/usize->f32 in layout calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // f32->u32 where the value is clamped non-negative
#![allow(clippy::struct_excessive_bools)] // PinEntryView and FrameInput carry independent flags
#![allow(clippy::float_cmp)] // Exact comparisons against 0.0/1.0 animation endpoints

//! Slot-based PIN/OTP entry widget for `embedded-graphics` displays.
//!
//! The widget draws one slot per expected character (rectangle, underline,
//! circle or bare glyph), highlights the slot awaiting input, blinks a caret
//! in it and reports completion once every slot is filled. Error and Success
//! states recolor the slots and can play a shake or a pulse.
//!
//! # Modules
//!
//! | Module          | Concern                                                |
//! |-----------------|--------------------------------------------------------|
//! | [`geometry`]    | Slot rectangles, corner rounding, preferred size       |
//! | [`state`]       | Normal / Error / Success colors and effects            |
//! | [`render`]      | Frame planning and drawing onto any `DrawTarget`       |
//! | [`blink`]       | Caret blink state machine and the [`Scheduler`] seam   |
//! | [`coordinator`] | Reaction to text changes, completion detection         |
//! | [`text`]        | Text buffer, transformations, caret policy             |
//! | [`view`]        | [`PinEntryView`], the composed widget                  |
//! | [`settings`]    | TOML attribute loading                                 |
//!
//! Supporting modules: [`animations`] (timelines and color math), [`colors`],
//! [`config`] (defaults and timings), [`style`], [`styles`] (fonts) and
//! [`diagnostics`] (on-screen event log).
//!
//! # Logging
//!
//! Events are emitted with `tracing`. Install any subscriber to see them; the
//! simulator binary uses `tracing-subscriber` with `RUST_LOG` filtering.

pub mod animations;
pub mod blink;
pub mod colors;
pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod geometry;
pub mod render;
pub mod settings;
pub mod state;
pub mod style;
pub mod styles;
pub mod text;
pub mod view;

pub use blink::{ManualScheduler, Scheduler, TimerId};
pub use geometry::{MeasureSpec, SlotGeometry};
pub use settings::{ConfigError, PinViewConfig};
pub use state::{StateOverrides, VisualState};
pub use style::{Alignment, Padding, ShapeVariant, StyleConfig};
pub use text::{InputType, PasswordTransformation, TransformationMethod};
pub use view::{BlinkHandle, CompletionHandler, PinEntryView};

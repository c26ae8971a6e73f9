//! Declarative widget configuration.
//!
//! Every attribute a host can set from markup has a TOML key here. All keys
//! are optional; missing keys keep the widget's current value.
//!
//! ```toml
//! shape = "line"
//! gravity = "center"
//! item_count = 6
//! line_color = "#3F51B5"
//! error_line_color = "#F44336"
//! error_shake = true
//! ```

use std::{fs, path::Path};

use embedded_graphics::pixelcolor::Rgb565;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    colors::parse_hex,
    state::VisualState,
    style::{Alignment, ShapeVariant},
    text::InputType,
    view::PinEntryView,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color for `{key}`: {value:?}")]
    InvalidColor { key: &'static str, value: String },

    #[error("unknown input type: {0:?}")]
    InvalidInputType(String),
}

/// Widget attributes as read from TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinViewConfig {
    // Geometry
    pub shape: Option<String>,
    pub gravity: Option<String>,
    pub item_count: Option<usize>,
    pub item_width: Option<u32>,
    pub item_height: Option<u32>,
    pub item_radius: Option<u32>,
    pub item_spacing: Option<u32>,
    pub line_width: Option<u32>,
    pub text_size: Option<u32>,

    // Colors
    pub line_color: Option<String>,
    pub highlight_line_color: Option<String>,
    pub text_color: Option<String>,
    pub hint: Option<String>,
    pub hint_color: Option<String>,
    pub item_background: Option<String>,
    pub highlight_item_background: Option<String>,
    pub surface_color: Option<String>,

    // Caret
    pub cursor_visible: Option<bool>,
    pub cursor_color: Option<String>,
    pub cursor_width: Option<u32>,

    // Behavior
    pub input_type: Option<String>,
    pub password_hidden: Option<bool>,
    pub hide_line_when_filled: Option<bool>,
    pub animation_enabled: Option<bool>,
    pub auto_focus: Option<bool>,
    pub anchor_lines: Option<bool>,

    // Error state
    pub error_line_color: Option<String>,
    pub error_text_color: Option<String>,
    pub error_background: Option<String>,
    pub error_shake: Option<bool>,

    // Success state
    pub success_line_color: Option<String>,
    pub success_text_color: Option<String>,
    pub success_background: Option<String>,
    pub success_animation: Option<bool>,
}

impl PinViewConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!(path = %path.display(), "loaded widget config");
        Ok(config)
    }

    /// Apply every present key to `view`.
    ///
    /// Colors and the input type are validated before anything is applied,
    /// so an invalid file leaves the view untouched.
    pub fn apply(&self, view: &mut PinEntryView) -> Result<(), ConfigError> {
        let colors = ResolvedColors::resolve(self)?;
        let input_type = self.input_type.as_deref().map(parse_input_type).transpose()?;

        if let Some(name) = &self.shape {
            if ShapeVariant::parse(name).is_none() {
                view.record(format_args!("unknown shape {name:?}"));
            }
            view.set_shape(ShapeVariant::from_name(name));
        }
        if let Some(name) = &self.gravity {
            if Alignment::parse(name).is_none() {
                view.record(format_args!("unknown gravity {name:?}"));
            }
            view.set_alignment(Alignment::from_name(name));
        }
        if let Some(count) = self.item_count {
            view.set_item_count(count);
        }
        view.update_style(|style| {
            if let Some(width) = self.item_width {
                style.slot_width = width;
            }
            if let Some(height) = self.item_height {
                style.slot_height = height;
            }
            if let Some(spacing) = self.item_spacing {
                style.spacing = spacing;
            }
            if let Some(width) = self.line_width {
                style.border_width = width;
            }
            if let Some(size) = self.text_size {
                style.text_size = size;
            }
            // Radius last so it is clamped against the final shape and width.
            if let Some(radius) = self.item_radius {
                style.corner_radius = radius;
            }
        });

        if let Some(color) = colors.line {
            view.set_line_color(color);
        }
        if colors.highlight_line.is_some() {
            view.set_highlight_line_color(colors.highlight_line);
        }
        if let Some(color) = colors.text {
            view.set_text_color(color);
        }
        if let Some(hint) = &self.hint {
            view.set_hint(Some(hint));
        }
        if let Some(color) = colors.hint {
            view.set_hint_color(color);
        }
        if colors.item_background.is_some() {
            view.set_item_background(colors.item_background);
        }
        if colors.highlight_item_background.is_some() {
            view.set_highlight_item_background(colors.highlight_item_background);
        }
        if let Some(color) = colors.surface {
            view.set_surface_color(color);
        }

        if let Some(visible) = self.cursor_visible {
            view.set_cursor_visible(visible);
        }
        if let Some(color) = colors.cursor {
            view.set_cursor_color(color);
        }
        if let Some(width) = self.cursor_width {
            view.set_cursor_width(width);
        }

        if let Some(input_type) = input_type {
            view.set_input_type(input_type);
        }
        if let Some(hidden) = self.password_hidden {
            view.set_password_hidden(hidden);
        }
        if let Some(hide) = self.hide_line_when_filled {
            view.set_hide_line_when_filled(hide);
        }
        if let Some(enabled) = self.animation_enabled {
            view.set_animation_enabled(enabled);
        }
        if let Some(auto_focus) = self.auto_focus {
            view.set_auto_focus(auto_focus);
        }
        if let Some(enabled) = self.anchor_lines {
            view.set_anchor_lines(enabled);
        }

        let mut error = view.state_overrides(VisualState::Error);
        error.line_color = colors.error_line.or(error.line_color);
        error.text_color = colors.error_text.or(error.text_color);
        error.background_color = colors.error_background.or(error.background_color);
        error.shake_enabled = self.error_shake.unwrap_or(error.shake_enabled);
        view.configure(VisualState::Error, error);

        let mut success = view.state_overrides(VisualState::Success);
        success.line_color = colors.success_line.or(success.line_color);
        success.text_color = colors.success_text.or(success.text_color);
        success.background_color = colors.success_background.or(success.background_color);
        success.animation_enabled = self.success_animation.unwrap_or(success.animation_enabled);
        view.configure(VisualState::Success, success);

        debug!(?view, "config applied");
        Ok(())
    }
}

/// Color keys parsed up front.
#[derive(Debug, Default)]
struct ResolvedColors {
    line: Option<Rgb565>,
    highlight_line: Option<Rgb565>,
    text: Option<Rgb565>,
    hint: Option<Rgb565>,
    item_background: Option<Rgb565>,
    highlight_item_background: Option<Rgb565>,
    surface: Option<Rgb565>,
    cursor: Option<Rgb565>,
    error_line: Option<Rgb565>,
    error_text: Option<Rgb565>,
    error_background: Option<Rgb565>,
    success_line: Option<Rgb565>,
    success_text: Option<Rgb565>,
    success_background: Option<Rgb565>,
}

impl ResolvedColors {
    fn resolve(config: &PinViewConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            line: color("line_color", &config.line_color)?,
            highlight_line: color("highlight_line_color", &config.highlight_line_color)?,
            text: color("text_color", &config.text_color)?,
            hint: color("hint_color", &config.hint_color)?,
            item_background: color("item_background", &config.item_background)?,
            highlight_item_background: color("highlight_item_background", &config.highlight_item_background)?,
            surface: color("surface_color", &config.surface_color)?,
            cursor: color("cursor_color", &config.cursor_color)?,
            error_line: color("error_line_color", &config.error_line_color)?,
            error_text: color("error_text_color", &config.error_text_color)?,
            error_background: color("error_background", &config.error_background)?,
            success_line: color("success_line_color", &config.success_line_color)?,
            success_text: color("success_text_color", &config.success_text_color)?,
            success_background: color("success_background", &config.success_background)?,
        })
    }
}

fn color(key: &'static str, value: &Option<String>) -> Result<Option<Rgb565>, ConfigError> {
    value
        .as_deref()
        .map(|raw| parse_hex(raw).ok_or_else(|| ConfigError::InvalidColor { key, value: raw.to_owned() }))
        .transpose()
}

fn parse_input_type(name: &str) -> Result<InputType, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "number" => Ok(InputType::Number),
        "number_password" => Ok(InputType::NumberPassword),
        "text" => Ok(InputType::Text),
        "text_password" => Ok(InputType::TextPassword),
        "text_visible_password" => Ok(InputType::TextVisiblePassword),
        "web_password" => Ok(InputType::WebPassword),
        _ => Err(ConfigError::InvalidInputType(name.to_owned())),
    }
}

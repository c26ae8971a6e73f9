//! Text-side collaborators: the character buffer, display transformations,
//! input types and the caret movement policy.
//!
//! The widget never edits text in place. Every edit goes through a
//! [`TextBuffer`], which reports what changed as a [`TextChange`] for the
//! coordinator to react to.

use tracing::trace;

// =============================================================================
// Text Change
// =============================================================================

/// One edit: `before` characters starting at `start` were replaced by `after`
/// characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub before: usize,
    pub after: usize,
}

impl TextChange {
    #[inline]
    pub const fn is_insertion(&self) -> bool {
        self.after > self.before
    }

    #[inline]
    pub const fn changes_length(&self) -> bool {
        self.after != self.before
    }
}

// =============================================================================
// Buffer
// =============================================================================

/// Mutable character buffer with a single caret.
///
/// Positions and lengths count `char`s, not bytes.
pub trait TextBuffer {
    fn text(&self) -> &str;

    fn char_len(&self) -> usize {
        self.text().chars().count()
    }

    /// Caret position (selection end).
    fn selection(&self) -> usize;

    /// Move the caret, clamped to the text length.
    fn set_selection(&mut self, position: usize);
}

/// Length-limited buffer backing the widget.
///
/// Input beyond `max_len` characters is rejected, matching a length filter
/// on the host's editable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinBuffer {
    text: String,
    caret: usize,
    max_len: usize,
}

impl PinBuffer {
    pub const fn new(max_len: usize) -> Self {
        Self { text: String::new(), caret: 0, max_len }
    }

    #[inline]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.char_len() >= self.max_len
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text.char_indices().nth(char_index).map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Insert at the caret. Returns `None` when the buffer is full.
    pub fn insert(&mut self, c: char) -> Option<TextChange> {
        if self.is_full() {
            trace!(max_len = self.max_len, "insert rejected, buffer full");
            return None;
        }
        let at = self.caret.min(self.char_len());
        let offset = self.byte_offset(at);
        self.text.insert(offset, c);
        self.caret = at + 1;
        Some(TextChange { start: at, before: 0, after: 1 })
    }

    /// Delete the character before the caret. Returns `None` at the start.
    pub fn delete_backward(&mut self) -> Option<TextChange> {
        let at = self.caret.min(self.char_len());
        if at == 0 {
            return None;
        }
        let offset = self.byte_offset(at - 1);
        self.text.remove(offset);
        self.caret = at - 1;
        Some(TextChange { start: at - 1, before: 1, after: 0 })
    }

    /// Replace the whole content, keeping at most `max_len` characters.
    pub fn replace_all(&mut self, text: &str) -> TextChange {
        let before = self.char_len();
        self.text = text.chars().take(self.max_len).collect();
        let after = self.char_len();
        self.caret = after;
        TextChange { start: 0, before, after }
    }

    /// Change the length limit. Content beyond the new limit is dropped.
    pub fn set_max_len(&mut self, max_len: usize) -> Option<TextChange> {
        self.max_len = max_len;
        let len = self.char_len();
        if len <= max_len {
            return None;
        }
        let offset = self.byte_offset(max_len);
        self.text.truncate(offset);
        self.caret = self.caret.min(max_len);
        Some(TextChange { start: max_len, before: len - max_len, after: 0 })
    }
}

impl TextBuffer for PinBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> usize {
        self.caret
    }

    fn set_selection(&mut self, position: usize) {
        self.caret = position.min(self.char_len());
    }
}

// =============================================================================
// Transformations
// =============================================================================

/// Maps the entered text to the text shown in the slots.
pub trait TransformationMethod {
    fn transform(&self, source: &str) -> String;
}

/// Shows every character as `*`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordTransformation;

impl PasswordTransformation {
    pub const MASK: char = '*';
}

impl TransformationMethod for PasswordTransformation {
    fn transform(&self, source: &str) -> String {
        source.chars().map(|_| Self::MASK).collect()
    }
}

// =============================================================================
// Input Type
// =============================================================================

/// Keyboard class requested from the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Number,
    NumberPassword,
    Text,
    TextPassword,
    TextVisiblePassword,
    WebPassword,
}

impl InputType {
    /// Password classes start with their characters hidden.
    pub const fn is_password(self) -> bool {
        matches!(self, Self::NumberPassword | Self::TextPassword | Self::TextVisiblePassword | Self::WebPassword)
    }
}

// =============================================================================
// Movement Policy
// =============================================================================

/// Decides where the caret may go when the host moves it.
pub trait MovementPolicy {
    /// Caret position to apply for a host-requested `requested` position.
    fn constrain_selection(&self, requested: usize, len: usize) -> usize;

    /// Whether touch/drag selection of a range is allowed.
    fn can_select_arbitrarily(&self) -> bool;
}

/// Pins the caret to the end of the text. Stateless.
#[derive(Clone, Copy, Debug, Default)]
pub struct LockedCaret;

impl MovementPolicy for LockedCaret {
    fn constrain_selection(&self, _requested: usize, len: usize) -> usize {
        len
    }

    fn can_select_arbitrarily(&self) -> bool {
        false
    }
}

//! Input/completion coordination.
//!
//! Reacts to every text change reported by the buffer:
//!
//! 1. A length change clears Error and Success feedback.
//! 2. The caret is forced back to the end of the text.
//! 3. Insertions ask for the entry animation (when enabled).
//! 4. The display string is recomputed through the transformation, if any.
//! 5. When the text fills every slot the outcome carries the full code.
//!
//! Completion is not deduplicated: every change event that observes a full
//! buffer reports it again. The view runs its completion handler from the
//! outcome once the change is fully applied.

use std::fmt;

use tracing::debug;

use crate::{
    state::VisualStateModel,
    text::{LockedCaret, MovementPolicy, TextBuffer, TextChange, TransformationMethod},
};

/// What a text change asks the widget to do next.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeOutcome {
    /// Error or Success was cleared by this change.
    pub feedback_cleared: bool,
    /// The caret was not at the end and has been moved there.
    pub caret_moved: bool,
    /// Restart the entry animation for the last character.
    pub restart_entry: bool,
    /// Full text when this change completed the code.
    pub completed: Option<String>,
}

pub struct InputCoordinator {
    transformation: Option<Box<dyn TransformationMethod>>,
    policy: Box<dyn MovementPolicy>,
    display: String,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self {
            transformation: None,
            policy: Box::new(LockedCaret),
            display: String::new(),
        }
    }

    /// Attach or remove the display transformation. Call
    /// [`Self::refresh_display`] afterwards.
    pub fn set_transformation(&mut self, transformation: Option<Box<dyn TransformationMethod>>) {
        self.transformation = transformation;
    }

    #[inline]
    pub fn has_transformation(&self) -> bool {
        self.transformation.is_some()
    }

    /// Replace the caret policy. The default is [`LockedCaret`].
    pub fn set_movement_policy(&mut self, policy: Box<dyn MovementPolicy>) {
        self.policy = policy;
    }

    /// Text as drawn in the slots.
    #[inline]
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// Recompute the display string from the entered text.
    pub fn refresh_display(&mut self, text: &str) {
        self.display = match &self.transformation {
            Some(transformation) => transformation.transform(text),
            None => text.to_owned(),
        };
    }

    /// Process one text change. See the module docs for the steps.
    pub fn on_text_changed(
        &mut self,
        buffer: &mut dyn TextBuffer,
        states: &mut VisualStateModel,
        change: TextChange,
        slot_count: usize,
        entry_animation: bool,
    ) -> ChangeOutcome {
        let mut outcome = ChangeOutcome::default();

        if change.changes_length() {
            let previous = states.current();
            states.set_error(false);
            states.set_success(false);
            outcome.feedback_cleared = states.current() != previous;
        }

        let len = buffer.char_len();
        if buffer.selection() != len {
            buffer.set_selection(len);
            outcome.caret_moved = true;
        }

        outcome.restart_entry = entry_animation && change.is_insertion();

        self.refresh_display(buffer.text());

        if len == slot_count {
            debug!(len, "code complete");
            outcome.completed = Some(buffer.text().to_owned());
        }

        outcome
    }

    /// Constrain a host-initiated caret move through the movement policy.
    /// Returns `true` when the caret was moved back.
    pub fn on_selection_changed(&self, buffer: &mut dyn TextBuffer, requested: usize) -> bool {
        let len = buffer.char_len();
        let position = self.policy.constrain_selection(requested, len);
        buffer.set_selection(position);
        position != requested
    }

    /// Whether the host may offer range selection.
    pub fn can_select_arbitrarily(&self) -> bool {
        self.policy.can_select_arbitrarily()
    }
}

impl Default for InputCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputCoordinator")
            .field("display", &self.display)
            .field("has_transformation", &self.transformation.is_some())
            .finish_non_exhaustive()
    }
}

//! Bounded in-memory event log.
//!
//! Keeps the last few widget events (state changes, completions, clamped
//! configuration) for on-screen display in the simulator. Entries are
//! fixed-capacity `heapless` strings; nothing here allocates.
//!
//! Events are also emitted through `tracing`; this log is the part a user
//! can see without a subscriber attached.

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Configuration
// =============================================================================

/// Maximum number of entries kept.
pub const LOG_CAPACITY: usize = 6;

/// Maximum characters per entry, longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 40;

// =============================================================================
// Event Log
// =============================================================================

/// Ring buffer of recent events, oldest first.
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_CAPACITY>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { buffer: Deque::new() }
    }

    /// Append a message, dropping the oldest entry when full.
    pub fn push(&mut self, msg: &str) {
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.push_line(line);
    }

    /// Append a formatted message, truncated to the line length.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut line = Truncating(String::new());
        line.write_fmt(args).ok();
        self.push_line(line.0);
    }

    fn push_line(&mut self, line: String<LOG_LINE_LENGTH>) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(|line| line.as_str())
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&str> {
        self.buffer.back().map(|line| line.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that silently stops at capacity.
struct Truncating(String<LOG_LINE_LENGTH>);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

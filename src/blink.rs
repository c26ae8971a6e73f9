//! Caret blink scheduling.
//!
//! The caret toggles every [`BLINK_INTERVAL`] while the widget is focused and
//! the caret is enabled. Timing comes from the host through the [`Scheduler`]
//! trait: the blink asks for a delayed fire of its [`TimerId`], and the host
//! calls back into the widget when that delay elapses.
//!
//! # States
//!
//! ```text
//!            make_blink (should blink)
//!   Idle ─────────────────────────────▶ Scheduled ──┐ fire: toggle + reschedule
//!    ▲  ◀──── fire/make_blink (should not) ─┘   ▲ ◀─┘
//!    │                                          │
//!    └─ resume ── Cancelled ◀── suspend ────────┘
//! ```
//!
//! A fire that arrives in any state but `Scheduled` is stale and ignored.
//! Every fire re-checks focus and visibility, so losing either ends the cycle
//! within one interval with the caret hidden.
//!
//! [`ManualScheduler`] is a deterministic queue for tests and the simulator.

use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use tracing::trace;

use crate::config::BLINK_INTERVAL;

// =============================================================================
// Scheduler Seam
// =============================================================================

/// Identifies one pending delayed callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

impl TimerId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Delayed-callback facility provided by the host.
///
/// Scheduling an id that is already pending replaces the earlier request.
pub trait Scheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration);
    fn cancel(&mut self, timer: TimerId);
}

// =============================================================================
// Blink State Machine
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Created, nothing pending.
    Idle,
    /// A fire is pending.
    Scheduled,
    /// Suspended by detach or screen-off; fires are ignored until resumed.
    Cancelled,
}

/// Caret visibility plus its pending-fire bookkeeping.
///
/// The phase is created on first use; until then suspend and resume are
/// no-ops. Every method returns `true` when caret visibility changed and the
/// widget needs a redraw.
#[derive(Debug)]
pub struct CursorBlink {
    timer: TimerId,
    phase: Option<BlinkPhase>,
    visible: bool,
}

impl CursorBlink {
    pub fn new() -> Self {
        Self { timer: TimerId::next(), phase: None, visible: false }
    }

    #[inline]
    pub const fn timer(&self) -> TimerId {
        self.timer
    }

    /// Current phase, `None` before the first blink was requested.
    #[inline]
    pub const fn phase(&self) -> Option<BlinkPhase> {
        self.phase
    }

    /// Whether the caret is drawn this frame.
    #[inline]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Restart the cycle with the caret hidden, or stop it.
    ///
    /// `should_blink` is "caret enabled and widget focused".
    pub fn make_blink(&mut self, should_blink: bool, scheduler: &mut dyn Scheduler) -> bool {
        let changed = self.hide();
        if should_blink {
            let phase = self.phase.get_or_insert(BlinkPhase::Idle);
            scheduler.cancel(self.timer);
            if *phase != BlinkPhase::Cancelled {
                scheduler.schedule(self.timer, BLINK_INTERVAL);
                *phase = BlinkPhase::Scheduled;
            }
        } else if let Some(phase) = self.phase.as_mut() {
            scheduler.cancel(self.timer);
            if *phase == BlinkPhase::Scheduled {
                *phase = BlinkPhase::Idle;
            }
        }
        changed
    }

    /// Handle the pending fire.
    pub fn fire(&mut self, should_blink: bool, scheduler: &mut dyn Scheduler) -> bool {
        if self.phase != Some(BlinkPhase::Scheduled) {
            trace!(phase = ?self.phase, "stale blink fire ignored");
            return false;
        }
        if should_blink {
            self.visible = !self.visible;
            scheduler.schedule(self.timer, BLINK_INTERVAL);
            true
        } else {
            self.phase = Some(BlinkPhase::Idle);
            self.hide()
        }
    }

    /// Stop blinking until [`Self::resume`]. Used for detach and screen-off.
    pub fn suspend(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.phase.is_none() {
            return false;
        }
        scheduler.cancel(self.timer);
        self.phase = Some(BlinkPhase::Cancelled);
        self.hide()
    }

    /// Lift a suspension and restart the cycle if the caret should blink.
    pub fn resume(&mut self, should_blink: bool, scheduler: &mut dyn Scheduler) -> bool {
        if self.phase.is_none() {
            return false;
        }
        self.phase = Some(BlinkPhase::Idle);
        self.make_blink(should_blink, scheduler)
    }

    fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Manual Scheduler
// =============================================================================

#[derive(Debug, Default)]
struct Queue {
    now: Duration,
    pending: Vec<(TimerId, Duration)>,
}

/// Single-threaded delayed-callback queue driven by explicit time steps.
///
/// Clones share one queue, so a widget can hold one handle while the host
/// loop advances another.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.queue.borrow().pending.iter().any(|(id, _)| *id == timer)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Advance time by `by`, invoking `fire` for each due timer in due order.
    ///
    /// Timers rescheduled from inside `fire` fire again in the same call if
    /// their new due time is still within the step. The queue is not
    /// borrowed while `fire` runs.
    pub fn advance(&self, by: Duration, mut fire: impl FnMut(TimerId)) {
        let target = self.now() + by;
        while let Some(timer) = self.pop_due(target) {
            fire(timer);
        }
        self.queue.borrow_mut().now = target;
    }

    fn pop_due(&self, target: Duration) -> Option<TimerId> {
        let mut queue = self.queue.borrow_mut();
        let (slot, &(timer, due)) = queue
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, due))| *due <= target)
            .min_by_key(|(_, (_, due))| *due)?;
        queue.pending.swap_remove(slot);
        queue.now = due;
        Some(timer)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let mut queue = self.queue.borrow_mut();
        let due = queue.now + delay;
        queue.pending.retain(|(id, _)| *id != timer);
        queue.pending.push((timer, due));
    }

    fn cancel(&mut self, timer: TimerId) {
        self.queue.borrow_mut().pending.retain(|(id, _)| *id != timer);
    }
}

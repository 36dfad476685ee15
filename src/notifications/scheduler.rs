// SPDX-License-Identifier: MPL-2.0
//! Cancellable per-notification timers.
//!
//! The scheduler never sleeps and never calls back on its own. It records
//! deadlines and hands out the ones that are due when the host's event loop
//! polls it with the current time, so every timer fires on a later turn of
//! that loop and exactly once.

use super::id::NotificationId;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time from `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Time as seen by tokio, which tests can pause and advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Starts the clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Which step of the lifecycle a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Auto-dismiss: starts the exit transition.
    Expiry,
    /// End of the exit transition: removes the notification.
    Exit,
}

/// A timer handed back by [`LifecycleScheduler::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: NotificationId,
    pub phase: Phase,
    pub deadline: Instant,
}

#[derive(Clone)]
struct Timer {
    id: NotificationId,
    phase: Phase,
    deadline: Instant,
    seq: u64,
}

/// Pending timers, at most one per (id, phase) pair.
#[derive(Default)]
pub struct LifecycleScheduler {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl fmt::Debug for LifecycleScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleScheduler")
            .field("pending", &self.timers.len())
            .finish()
    }
}

impl LifecycleScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer firing `delay` after `from`. Re-arming the same
    /// (id, phase) pair replaces the earlier deadline.
    ///
    /// Returns `false` without arming anything when the deadline is beyond
    /// what `Instant` can represent; such a timer would never fire anyway.
    pub fn schedule(
        &mut self,
        id: NotificationId,
        phase: Phase,
        delay: Duration,
        from: Instant,
    ) -> bool {
        self.cancel(&id, phase);
        let Some(deadline) = from.checked_add(delay) else {
            return false;
        };
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.timers.push(Timer {
            id,
            phase,
            deadline,
            seq,
        });
        true
    }

    /// Prevents a pending timer from firing. Returns `false` when nothing was
    /// pending, which covers timers that already fired.
    pub fn cancel(&mut self, id: &NotificationId, phase: Phase) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| !(t.phase == phase && &t.id == id));
        self.timers.len() != before
    }

    /// Cancels every timer of a notification.
    pub fn cancel_all(&mut self, id: &NotificationId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| &t.id != id);
        before - self.timers.len()
    }

    /// Cancels everything. Used on teardown.
    pub fn clear(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Removes and returns the earliest timer due at `now`, if any.
    ///
    /// Timers with equal deadlines come out in the order they were armed.
    pub fn pop_due(&mut self, now: Instant) -> Option<FiredTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.seq))
            .map(|(index, _)| index)?;
        let timer = self.timers.swap_remove(index);
        Some(FiredTimer {
            id: timer.id,
            phase: timer.phase,
            deadline: timer.deadline,
        })
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    #[must_use]
    pub fn is_pending(&self, id: &NotificationId, phase: Phase) -> bool {
        self.timers.iter().any(|t| t.phase == phase && &t.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

//! Named game timers on a simulated millisecond clock
//!
//! The engine owns one [`Scheduler`]. Each concern gets a named timer that can
//! be replaced or cancelled on its own, and every timer goes away at once with
//! [`Scheduler::cancel_all`] when the game leaves `Playing`.

use crate::sim::Direction;

/// Timer names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Hold-to-move repeat for all held arrow keys
    KeyRepeat,
    /// Hold-to-move repeat bound to one touch control
    TouchRepeat(Direction),
    /// Moving bin AI step
    BinTick,
    /// One second of countdown
    Countdown,
    /// Idle check for the truck's moving flag
    MovingDecay,
    /// One-shot end of the pickup lift animation
    LiftingClear,
    /// Low-time warning blink
    WarningFlash,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    due_ms: u64,
    /// `None` for one-shot timers
    period_ms: Option<u64>,
    /// Registration order, breaks ties between timers due at the same time
    seq: u64,
}

/// Simulated clock plus pending timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `id` once after `delay_ms`, replacing any pending timer of that name
    pub fn schedule_once(&mut self, id: TimerId, delay_ms: u64) {
        self.insert(id, delay_ms, None);
    }

    /// Fire `id` every `period_ms`, first after one period, replacing any
    /// pending timer of that name
    pub fn schedule_every(&mut self, id: TimerId, period_ms: u64) {
        let period = period_ms.max(1);
        self.insert(id, period, Some(period));
    }

    fn insert(&mut self, id: TimerId, delay_ms: u64, period_ms: Option<u64>) {
        self.cancel(id);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            id,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            seq,
        });
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("Cancelling {} timer(s)", self.timers.len());
        }
        self.timers.clear();
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the timer's due time. Recurring timers are re-armed
    /// one period later, one-shots are removed. Call repeatedly until `None`,
    /// then [`Scheduler::advance_to`] the same `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let id = timer.id;
        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.period_ms {
            Some(period) => timer.due_ms += period,
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(id)
    }

    /// Move the clock forward to `until_ms` (never backward)
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

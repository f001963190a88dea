//! Named, individually cancellable timers.
//!
//! The core never sleeps. It asks its driver to start a timer and later
//! receives the timer's id back as an event. Each owner keeps at most one
//! live handle per slot, so a fired id that no longer matches the slot is
//! stale and must be ignored.

use super::outbox::Outbox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque timer identifier, unique within one game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct TimerId(pub(crate) u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// What a timer is for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Show the next element of the sequence
    PlaybackStep,
    /// Last flash finished; open input
    PlaybackEnd,
    /// Release the input lock after a correct, non-final submission
    InputUnlock,
    /// Move from a completed round to the next one
    RoundAdvance,
    /// Delay between the first completed round and the first challenge check
    ChallengeArm,
    /// Periodic challenge trigger check
    ChallengeCheck,
    /// One-second countdown tick of an active challenge
    ChallengeTick,
    /// Pause after a solved challenge before play resumes
    ChallengeGrace,
    /// Put "your turn" back after a transient status message
    StatusRestore,
}

/// A started timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimerHandle {
    pub id: TimerId,
    pub kind: TimerKind,
}

/// Holder for the single current timer of one owner.
#[derive(Debug, Default)]
pub struct TimerSlot {
    current: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Start `kind` after `after`, cancelling whatever the slot held.
    pub fn arm(&mut self, kind: TimerKind, after: Duration, out: &mut Outbox) -> TimerHandle {
        self.clear(out);
        let handle = out.start_timer(kind, after);
        self.current = Some(handle);
        handle
    }

    /// Cancel the current timer, if any.
    pub fn clear(&mut self, out: &mut Outbox) {
        if let Some(handle) = self.current.take() {
            out.cancel_timer(handle.id);
        }
    }

    /// Consume the slot if `id` is its current timer.
    ///
    /// Returns the kind of the fired timer, or `None` for a stale id.
    pub fn fire(&mut self, id: TimerId) -> Option<TimerKind> {
        match self.current {
            Some(handle) if handle.id == id => {
                self.current = None;
                Some(handle.kind)
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<TimerHandle> {
        self.current
    }

    pub fn is_armed(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Directive;

    #[test]
    fn arming_replaces_and_cancels_previous_timer() {
        let mut out = Outbox::new();
        let mut slot = TimerSlot::new();

        let first = slot.arm(TimerKind::InputUnlock, Duration::from_millis(300), &mut out);
        let second = slot.arm(TimerKind::RoundAdvance, Duration::from_secs(2), &mut out);

        assert_ne!(first.id, second.id);
        let directives = out.drain();
        assert!(directives.contains(&Directive::CancelTimer(first.id)));
        assert_eq!(slot.current(), Some(second));
    }

    #[test]
    fn stale_id_does_not_fire() {
        let mut out = Outbox::new();
        let mut slot = TimerSlot::new();

        let old = slot.arm(TimerKind::ChallengeTick, Duration::from_secs(1), &mut out);
        let new = slot.arm(TimerKind::ChallengeTick, Duration::from_secs(1), &mut out);

        assert_eq!(slot.fire(old.id), None);
        assert!(slot.is_armed());
        assert_eq!(slot.fire(new.id), Some(TimerKind::ChallengeTick));
        assert!(!slot.is_armed());
    }

    #[test]
    fn fired_timer_cannot_fire_twice() {
        let mut out = Outbox::new();
        let mut slot = TimerSlot::new();

        let handle = slot.arm(TimerKind::PlaybackStep, Duration::from_millis(600), &mut out);

        assert_eq!(slot.fire(handle.id), Some(TimerKind::PlaybackStep));
        assert_eq!(slot.fire(handle.id), None);
    }

    #[test]
    fn clearing_empty_slot_emits_nothing() {
        let mut out = Outbox::new();
        let mut slot = TimerSlot::new();

        slot.clear(&mut out);

        assert!(out.drain().is_empty());
    }
}

//! Directives produced by the pure core.
//!
//! Handling an event never performs I/O. Instead the core appends
//! directives to an [`Outbox`] and the driver executes them: display
//! commands go to the presentation sink, timer directives go to whatever
//! clock the driver runs on.

use super::timer::{TimerHandle, TimerId, TimerKind};
use crate::present::DisplayCommand;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One side effect requested by the core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Fire-and-forget display command
    Present(DisplayCommand),
    /// Start a one-shot timer; the driver reports it back as `TimerFired`
    StartTimer { handle: TimerHandle, after: Duration },
    /// Tear down a timer that has not fired yet
    CancelTimer(TimerId),
}

/// Accumulates directives and allocates timer ids.
#[derive(Debug, Default)]
pub struct Outbox {
    directives: Vec<Directive>,
    next_timer: u64,
}

impl Outbox {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            next_timer: 0,
        }
    }

    pub fn present(&mut self, command: DisplayCommand) {
        self.directives.push(Directive::Present(command));
    }

    pub(crate) fn start_timer(&mut self, kind: TimerKind, after: Duration) -> TimerHandle {
        self.next_timer += 1;
        let handle = TimerHandle {
            id: TimerId(self.next_timer),
            kind,
        };
        self.directives.push(Directive::StartTimer { handle, after });
        handle
    }

    pub(crate) fn cancel_timer(&mut self, id: TimerId) {
        self.directives.push(Directive::CancelTimer(id));
    }

    /// Take every directive queued so far.
    pub fn drain(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

//! Deterministic driver over a virtual clock.
//!
//! Timers are kept in a pending table and fired in order of due time (ties
//! broken by id, i.e. start order) whenever the clock is advanced. Nothing
//! sleeps, so whole games run instantly in tests and replays.

use crate::core::{Directive, TimerId, TimerKind};
use crate::game::{Game, GameEvent};
use crate::model::{Color, Gesture};
use crate::present::DisplayCommand;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    due: Duration,
    kind: TimerKind,
}

pub struct ManualDriver<R: Rng = StdRng> {
    game: Game<R>,
    now: Duration,
    pending: BTreeMap<TimerId, Pending>,
    presented: Vec<DisplayCommand>,
}

impl<R: Rng> ManualDriver<R> {
    pub fn new(mut game: Game<R>) -> Self {
        let initial = game.take_directives();
        let mut driver = Self {
            game,
            now: Duration::ZERO,
            pending: BTreeMap::new(),
            presented: Vec::new(),
        };
        driver.apply(initial);
        driver
    }

    /// Deliver an external event at the current virtual time.
    pub fn send(&mut self, event: GameEvent) {
        let directives = self.game.handle(event);
        self.apply(directives);
    }

    /// Report every configured target visible.
    pub fn acquire_targets<I, T>(&mut self, targets: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for target in targets {
            self.send(GameEvent::TargetReported {
                target: target.into(),
                visible: true,
            });
        }
    }

    pub fn submit(&mut self, color: Color) {
        self.send(GameEvent::SubmitColor(color));
    }

    /// Click the sphere anchored on `target`.
    pub fn click(&mut self, target: impl Into<String>) {
        self.send(GameEvent::TargetClicked {
            target: target.into(),
        });
    }

    /// Report one target's visibility.
    pub fn set_visible(&mut self, target: impl Into<String>, visible: bool) {
        self.send(GameEvent::TargetReported {
            target: target.into(),
            visible,
        });
    }

    pub fn repeat(&mut self) {
        self.send(GameEvent::RequestRepeat);
    }

    pub fn gesture(&mut self, gesture: Gesture) {
        self.send(GameEvent::Gesture(gesture));
    }

    /// Move the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while let Some((id, due)) = self.next_due() {
            if due > target {
                break;
            }
            self.fire(id, due);
        }
        self.now = target;
    }

    /// Jump to the next pending timer and fire it. Returns `false` when
    /// nothing is pending.
    pub fn step(&mut self) -> bool {
        match self.next_due() {
            Some((id, due)) => {
                self.fire(id, due);
                true
            }
            None => false,
        }
    }

    /// Fire timers until `done` holds or `budget` of virtual time passes.
    pub fn run_until<F>(&mut self, done: F, budget: Duration) -> bool
    where
        F: Fn(&Game<R>) -> bool,
    {
        let deadline = self.now + budget;
        loop {
            if done(&self.game) {
                return true;
            }
            match self.next_due() {
                Some((id, due)) if due <= deadline => self.fire(id, due),
                _ => {
                    self.now = deadline;
                    return done(&self.game);
                }
            }
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn presented(&self) -> &[DisplayCommand] {
        &self.presented
    }

    pub fn take_presented(&mut self) -> Vec<DisplayCommand> {
        std::mem::take(&mut self.presented)
    }

    pub fn pending_timers(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        self.pending.values().map(|pending| pending.kind).collect()
    }

    fn next_due(&self) -> Option<(TimerId, Duration)> {
        self.pending
            .iter()
            .min_by_key(|(id, pending)| (pending.due, **id))
            .map(|(id, pending)| (*id, pending.due))
    }

    fn fire(&mut self, id: TimerId, due: Duration) {
        self.pending.remove(&id);
        self.now = self.now.max(due);
        self.send(GameEvent::TimerFired(id));
    }

    fn apply(&mut self, directives: Vec<Directive>) {
        for directive in directives {
            match directive {
                Directive::Present(command) => self.presented.push(command),
                Directive::StartTimer { handle, after } => {
                    self.pending.insert(
                        handle.id,
                        Pending {
                            due: self.now + after,
                            kind: handle.kind,
                        },
                    );
                }
                Directive::CancelTimer(id) => {
                    self.pending.remove(&id);
                }
            }
        }
    }
}

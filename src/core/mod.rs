//! Core state machine types.
//!
//! This module contains the pure building blocks the game is assembled from:
//! - Session phases
//! - Guard predicates for input legality
//! - Phase history
//! - Timer handles and the outbox of directives
//!
//! Nothing in here sleeps, spawns or performs I/O, following the
//! "pure core, imperative shell" philosophy.

mod guard;
mod history;
mod outbox;
mod phase;
mod timer;

pub use guard::Guard;
pub use history::{PhaseChange, PhaseHistory};
pub use outbox::{Directive, Outbox};
pub use phase::Phase;
pub use timer::{TimerHandle, TimerId, TimerKind, TimerSlot};

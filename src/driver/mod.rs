//! Shells that execute the directives a [`Game`](crate::game::Game) emits.
//!
//! - [`ManualDriver`]: virtual clock, for tests and replays
//! - [`GameLoop`]: tokio runtime, real timers and a presentation sink

mod manual;
mod runtime;

pub use manual::ManualDriver;
pub use runtime::{GameHandle, GameLoop, GestureFeed};

//! Recall: an event-driven Simon-says memory game engine
//!
//! The game shows a growing sequence of colours and the player repeats it.
//! Once the first round is complete, gesture challenges may interrupt the
//! player's turn. Input comes from buttons, spatial click targets and a hand
//! gesture classifier; output is a stream of display commands.
//!
//! Recall follows a "pure core, imperative shell" layout. Everything that
//! decides what happens is synchronous and deterministic: handlers take an
//! event, update state and append [`Directive`]s to an [`Outbox`]. Drivers
//! in [`driver`] execute those directives with real or virtual time.
//!
//! # Core Concepts
//!
//! - **Phase**: the session's state machine, see [`Phase`]
//! - **Guards**: predicates deciding when input is legal
//! - **Timer slots**: every timed step has one owner and a cancellable id,
//!   so nothing from a finished phase can fire into the next
//! - **History**: a timestamped record of every phase change
//!
//! # Example
//!
//! ```rust
//! use recall::driver::ManualDriver;
//! use recall::{Game, GameConfig, Phase};
//! use std::time::Duration;
//!
//! let game = Game::seeded(GameConfig::default().without_challenges(), 7).unwrap();
//! let mut driver = ManualDriver::new(game);
//!
//! driver.acquire_targets(["marker1", "marker2", "marker3"]);
//! driver.run_until(
//!     |game| game.session().phase() == Phase::AwaitingInput,
//!     Duration::from_secs(10),
//! );
//!
//! let first = driver.game().session().state().sequence.as_slice()[0];
//! driver.submit(first);
//! assert_eq!(driver.game().session().state().score, 10);
//! ```

pub mod challenge;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod game;
pub mod model;
pub mod present;
pub mod readiness;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use config::GameConfig;
pub use core::{Directive, Outbox, Phase, PhaseHistory, TimerId};
pub use error::GameError;
pub use game::{Game, GameEvent, GameSummary};
pub use model::{Color, Gesture};
pub use present::{DisplayCommand, PresentationSink, StatusMessage};

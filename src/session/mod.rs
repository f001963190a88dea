//! Session state machine.
//!
//! # Components
//! - `state.rs`: SessionState and FailureCause
//! - `rules.rs`: guards deciding input legality
//! - `scoring.rs`: pure score arithmetic
//! - `machine.rs`: the Session that ties them together

mod machine;
pub mod rules;
pub mod scoring;
mod state;

pub use machine::{RepeatOutcome, Session, Submission};
pub use rules::InputRules;
pub use state::{FailureCause, SessionState};

//! Presentation boundary.
//!
//! The game core speaks to whatever renders it through [`DisplayCommand`]s
//! and never awaits an acknowledgement.

mod command;
mod sink;

pub use command::{DisplayCommand, Mood, StatusMessage};
pub use sink::{ChannelSink, JsonLinesSink, PresentationSink, RecordingSink, SinkError, TracingSink};

//! Presentation sinks.
//!
//! A sink receives display commands and never reports anything back into
//! game logic. Sinks may fail (a closed pipe, a dropped receiver); drivers
//! log those failures and carry on, so a broken presenter cannot corrupt a
//! session.

use super::command::DisplayCommand;
use std::io::Write;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write display command: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode display command: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("presentation receiver has gone away")]
    Disconnected,
}

/// Consumer of display commands.
pub trait PresentationSink {
    fn present(&mut self, command: &DisplayCommand) -> Result<(), SinkError>;
}

/// Logs every command through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn present(&mut self, command: &DisplayCommand) -> Result<(), SinkError> {
        match command {
            DisplayCommand::SetStatus { message, mood } => {
                info!(mood = ?mood, "{message}");
            }
            DisplayCommand::ShowGameOver { level, score } => {
                info!(level, score, "game over");
            }
            other => debug!(command = ?other, "present"),
        }
        Ok(())
    }
}

/// Keeps every command in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    commands: Vec<DisplayCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DisplayCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, command: &DisplayCommand) -> Result<(), SinkError> {
        self.commands.push(command.clone());
        Ok(())
    }
}

/// Writes one JSON object per command, newline separated.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PresentationSink for JsonLinesSink<W> {
    fn present(&mut self, command: &DisplayCommand) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, command)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Forwards commands to an async consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DisplayCommand>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DisplayCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PresentationSink for ChannelSink {
    fn present(&mut self, command: &DisplayCommand) -> Result<(), SinkError> {
        self.tx
            .send(command.clone())
            .map_err(|_| SinkError::Disconnected)
    }
}

//! A scripted player against the tokio game loop.
//!
//! The bot watches the display stream, replays what it was shown, answers
//! every gesture challenge and deliberately slips at a fixed level. Time is
//! paused, so the whole game runs instantly.
//!
//! Run with: `cargo run --example scripted_game`

use recall::driver::{GameHandle, GameLoop, GestureFeed};
use recall::present::ChannelSink;
use recall::telemetry::init_logging;
use recall::{Color, DisplayCommand, Game, GameConfig, GameError, StatusMessage};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, Level};

const SLIP_AT_LEVEL: u32 = 5;

#[tokio::main(flavor = "current_thread", start_paused = true)]
async fn main() -> Result<(), GameError> {
    init_logging(Level::INFO)?;

    let config = GameConfig::default();
    let targets = config.readiness.targets.clone();
    let cooldown = config.challenge.gesture_cooldown();

    let game = Game::new(config)?;
    let (sink, commands) = ChannelSink::new();
    let (game_loop, handle) = GameLoop::new(game, sink);
    let running = tokio::spawn(game_loop.run());

    for target in &targets {
        handle.report_target(target.as_str(), true)?;
    }

    let feed = handle.gesture_feed(cooldown);
    let player = tokio::spawn(play(handle, feed, commands));

    let summary = match running.await {
        Ok(result) => result?,
        Err(error) => {
            tracing::error!(%error, "game loop task failed");
            return Ok(());
        }
    };
    if let Ok(Err(error)) = player.await {
        tracing::warn!(%error, "player stopped early");
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(error) => tracing::error!(%error, "could not serialize summary"),
    }
    Ok(())
}

async fn play(
    handle: GameHandle,
    mut feed: GestureFeed,
    mut commands: UnboundedReceiver<DisplayCommand>,
) -> Result<(), GameError> {
    let mut shown: Vec<Color> = Vec::new();
    let mut submitted = 0;
    let mut level = 1;

    while let Some(command) = commands.recv().await {
        match &command {
            DisplayCommand::SetLevel(new_level) => {
                level = *new_level;
                submitted = 0;
            }
            DisplayCommand::SetStatus { message, .. } => {
                info!(%message, "status");
                if *message == StatusMessage::Watch {
                    shown.clear();
                }
            }
            DisplayCommand::ShowSequenceStep { color } => shown.push(*color),
            DisplayCommand::SetInputEnabled(true) => {
                let Some(expected) = shown.get(submitted).copied() else {
                    continue;
                };
                let color = if level == SLIP_AT_LEVEL && submitted + 1 == shown.len() {
                    next_color(expected)
                } else {
                    expected
                };
                handle.submit_color(color)?;
                submitted += 1;
            }
            DisplayCommand::ShowChallenge { gesture, .. } => {
                tokio::time::sleep(Duration::from_millis(1_200)).await;
                let now = tokio::time::Instant::now().into_std();
                feed.observe_at(Some(gesture.label()), now)?;
            }
            DisplayCommand::ShowGameOver { level, score } => {
                info!(level, score, "game over");
            }
            _ => {}
        }
    }
    Ok(())
}

fn next_color(color: Color) -> Color {
    let index = Color::ALL.iter().position(|c| *c == color).unwrap_or(0);
    Color::ALL[(index + 1) % Color::ALL.len()]
}

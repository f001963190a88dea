//! Log subscriber setup for binaries and demos.

use crate::error::GameError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install a global fmt subscriber at `level`.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: Level) -> Result<(), GameError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| GameError::Logging(error.to_string()))
}

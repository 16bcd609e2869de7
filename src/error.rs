//! Round configuration errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("player count must be in [1; 4], got {0}")]
    PlayerCount(u8),

    #[error("bot count {bots} exceeds player count {players}")]
    BotCount { bots: u8, players: u8 },

    #[error("playfield must have positive dimensions, got {width}x{height}")]
    Playfield { width: f32, height: f32 },

    #[error("tick rate must be positive, got {0}")]
    TickRate(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Dodgefall - a top-down multi-player obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (movement, collisions, effects, spawning)
//! - `settings`: Round configuration
//! - `results`: End-of-round ranking
//!
//! Window, input devices, sprites and audio live outside this crate. The
//! simulation consumes one directional intent per player per tick and
//! produces a draw list.

pub mod error;
pub mod results;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use results::{ResultEntry, RoundResult};
pub use settings::{EndRule, RoundConfig, SpawnTuning};

/// Game configuration constants
pub mod consts {
    use crate::sim::Rect;

    /// Default fixed tick rate (ticks per second)
    pub const DEFAULT_TICK_RATE: f32 = 60.0;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;

    /// Player count bounds and fallback
    pub const MIN_PLAYERS: u8 = 1;
    pub const MAX_PLAYERS: u8 = 4;
    pub const DEFAULT_PLAYERS: u8 = 2;

    /// Number of distinct player skins
    pub const MAX_SKINS: u8 = 4;

    /// Player defaults
    pub const PLAYER_LIVES: u32 = 2;
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Speed a dead player is pinned to
    pub const PLAYER_IDLE_SPEED: f32 = 1.0;
    pub const PLAYER_SIZE: (f32, f32) = (40.0, 34.0);
    /// Front-facing boxes first, the collision test short-circuits in order
    pub const PLAYER_HITBOXES: [Rect; 5] = [
        Rect::new(17.0, 30.0, 6.0, 4.0),
        Rect::new(15.0, 23.0, 9.0, 7.0),
        Rect::new(11.0, 15.0, 18.0, 8.0),
        Rect::new(7.0, 7.0, 26.0, 8.0),
        Rect::new(3.0, 0.0, 34.0, 7.0),
    ];

    /// Obstacle sprite and hitbox
    pub const OBSTACLE_SIZE: (f32, f32) = (40.0, 40.0);
    pub const OBSTACLE_HITBOXES: [Rect; 1] = [Rect::new(4.0, 4.0, 32.0, 32.0)];

    /// Item sprite and hitbox
    pub const ITEM_SIZE: (f32, f32) = (21.0, 21.0);
    pub const ITEM_HITBOXES: [Rect; 1] = [Rect::new(1.0, 1.0, 19.0, 19.0)];

    /// Item effect durations (seconds)
    pub const SLOW_DURATION_SECS: f32 = 5.0;
    pub const EXTRA_LIFE_DURATION_SECS: f32 = 1.0;
    pub const INVERT_DURATION_SECS: f32 = 5.0;

    /// Background scroll speed (pixels per tick)
    pub const SCROLL_SPEED: f32 = 2.0;
}

/// Convert a duration in seconds to a whole number of ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32, tick_rate: f32) -> u64 {
    (secs * tick_rate).round().max(1.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0, 60.0), 60);
        assert_eq!(secs_to_ticks(0.5, 60.0), 30);
        // Never rounds down to zero
        assert_eq!(secs_to_ticks(0.001, 60.0), 1);
    }
}

//! Round configuration
//!
//! Supplied at round start by whatever menu or CLI layer sits in front of the
//! simulation. Loadable from JSON; every field has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::secs_to_ticks;

/// When the round is flagged as ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EndRule {
    /// Ends once nobody is alive
    #[default]
    AllDead,
    /// Ends once at most one player is alive (multi-player rounds only)
    LastStanding,
}

impl EndRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndRule::AllDead => "all-dead",
            EndRule::LastStanding => "last-standing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all-dead" | "alldead" => Some(EndRule::AllDead),
            "last-standing" | "laststanding" => Some(EndRule::LastStanding),
            _ => None,
        }
    }

    /// Whether a round with `alive` of `total` players living has ended
    pub fn is_met(&self, alive: usize, total: usize) -> bool {
        match self {
            EndRule::AllDead => alive == 0,
            EndRule::LastStanding => alive == 0 || (total > 1 && alive <= 1),
        }
    }
}

/// Spawn rates and obstacle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    // === Obstacles ===
    /// Maximum obstacles on the field at once
    pub obstacle_max: usize,
    /// Minimum time between two obstacle spawns (seconds)
    pub obstacle_min_interval_secs: f32,
    /// Spawn rate at zero avoided obstacles (spawns per second)
    pub obstacle_base_rate: f32,
    /// Spawn rate added per avoided obstacle
    pub obstacle_rate_per_avoided: f32,
    /// Spawn rate ceiling
    pub obstacle_max_rate: f32,
    /// Base descent speed (pixels per tick)
    pub obstacle_base_speed: f32,
    /// Descent speed added per avoided obstacle
    pub obstacle_speed_per_avoided: f32,
    /// Ceiling on the avoided-count speed bonus
    pub obstacle_max_speed_bonus: f32,
    /// Horizontal drift is drawn from [-max, max] (pixels per tick)
    pub obstacle_max_drift: f32,
    /// Rotation rate is drawn from [-max, max] (degrees per tick)
    pub obstacle_max_rotation: f32,

    // === Items ===
    /// Minimum time between two item spawns (seconds)
    pub item_min_interval_secs: f32,
    /// Item spawn rate (spawns per second)
    pub item_rate: f32,
    /// How long an uncollected item stays on the field (seconds)
    pub item_time_alive_secs: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            obstacle_max: 12,
            obstacle_min_interval_secs: 0.3,
            obstacle_base_rate: 1.0,
            obstacle_rate_per_avoided: 0.05,
            obstacle_max_rate: 4.0,
            obstacle_base_speed: 3.0,
            obstacle_speed_per_avoided: 0.05,
            obstacle_max_speed_bonus: 4.0,
            obstacle_max_drift: 1.0,
            obstacle_max_rotation: 3.0,

            item_min_interval_secs: 3.0,
            item_rate: 0.2,
            item_time_alive_secs: 8.0,
        }
    }
}

impl SpawnTuning {
    /// Obstacle spawn rate (per second) after `avoided` obstacles went by
    pub fn obstacle_rate(&self, avoided: u32) -> f32 {
        (self.obstacle_base_rate + avoided as f32 * self.obstacle_rate_per_avoided)
            .min(self.obstacle_max_rate)
    }

    /// Descent speed for an obstacle spawned after `avoided` obstacles went by
    pub fn obstacle_speed(&self, avoided: u32) -> f32 {
        let bonus = (avoided as f32 * self.obstacle_speed_per_avoided)
            .min(self.obstacle_max_speed_bonus);
        self.obstacle_base_speed + bonus
    }
}

/// Everything needed to start a round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Number of players (1-4)
    pub player_count: u8,
    /// Trailing players driven by the bot controller
    pub bot_count: u8,
    /// Playfield width (pixels)
    pub width: f32,
    /// Playfield height (pixels)
    pub height: f32,
    /// Target tick rate (ticks per second)
    pub tick_rate: f32,
    /// RNG seed for spawners
    pub seed: u64,
    /// When the round ends
    pub end_rule: EndRule,
    /// Delay between the end flag and the round actually closing (seconds)
    pub end_grace_secs: f32,
    /// Spawner tuning
    pub spawn: SpawnTuning,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYERS,
            bot_count: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate: DEFAULT_TICK_RATE,
            seed: 0,
            end_rule: EndRule::AllDead,
            end_grace_secs: 1.0,
            spawn: SpawnTuning::default(),
        }
    }
}

impl RoundConfig {
    /// Default configuration with the given player count
    pub fn with_players(player_count: u8) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.violations().into_iter().next().map_or(Ok(()), Err)
    }

    fn violations(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            errors.push(ConfigError::PlayerCount(self.player_count));
        }
        if self.bot_count > self.player_count {
            errors.push(ConfigError::BotCount {
                bots: self.bot_count,
                players: self.player_count,
            });
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            errors.push(ConfigError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.tick_rate > 0.0) {
            errors.push(ConfigError::TickRate(self.tick_rate));
        }
        errors
    }

    /// Replace every invalid field with its default, reporting each fallback.
    /// The result always passes `validate`.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for error in self.violations() {
            if !matches!(error, ConfigError::BotCount { .. }) {
                log::warn!("Invalid round config: {error}; using default");
            }
            match error {
                ConfigError::PlayerCount(_) => self.player_count = defaults.player_count,
                ConfigError::Playfield { .. } => {
                    self.width = defaults.width;
                    self.height = defaults.height;
                }
                ConfigError::TickRate(_) => self.tick_rate = defaults.tick_rate,
                // handled below
                ConfigError::BotCount { .. } => {}
                ConfigError::Io(_) | ConfigError::Parse(_) => {}
            }
        }
        // Checked last, the player count may have just been replaced
        if self.bot_count > self.player_count {
            log::warn!(
                "Clamping bot count {} to player count {}",
                self.bot_count,
                self.player_count
            );
            self.bot_count = self.player_count;
        }
        self
    }

    /// Convert seconds to ticks at this round's tick rate
    pub fn ticks(&self, secs: f32) -> u64 {
        secs_to_ticks(secs, self.tick_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RoundConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_player_count_falls_back() {
        let config = RoundConfig::with_players(7);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlayerCount(7))
        ));

        let config = config.sanitized();
        assert_eq!(config.player_count, DEFAULT_PLAYERS);
        assert!(config.validate().is_ok());

        let config = RoundConfig::with_players(0).sanitized();
        assert_eq!(config.player_count, DEFAULT_PLAYERS);
    }

    #[test]
    fn test_single_player_is_valid() {
        assert!(RoundConfig::with_players(1).validate().is_ok());
    }

    #[test]
    fn test_bad_playfield_and_tick_rate() {
        let config = RoundConfig {
            width: 0.0,
            tick_rate: -5.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_bot_count_clamped() {
        let config = RoundConfig {
            player_count: 2,
            bot_count: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BotCount { .. })));
        assert_eq!(config.sanitized().bot_count, 2);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RoundConfig::from_json(r#"{ "player_count": 3, "seed": 42 }"#).unwrap();
        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, 42);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.spawn.obstacle_max, SpawnTuning::default().obstacle_max);

        assert!(matches!(
            RoundConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_obstacle_rate_saturates() {
        let tuning = SpawnTuning::default();
        assert_eq!(tuning.obstacle_rate(0), tuning.obstacle_base_rate);
        assert!(tuning.obstacle_rate(10) > tuning.obstacle_rate(0));
        assert_eq!(tuning.obstacle_rate(10_000), tuning.obstacle_max_rate);
    }

    #[test]
    fn test_obstacle_speed_bonus_capped() {
        let tuning = SpawnTuning::default();
        assert_eq!(tuning.obstacle_speed(0), tuning.obstacle_base_speed);
        assert_eq!(
            tuning.obstacle_speed(10_000),
            tuning.obstacle_base_speed + tuning.obstacle_max_speed_bonus
        );
    }

    #[test]
    fn test_end_rules() {
        assert!(EndRule::AllDead.is_met(0, 2));
        assert!(!EndRule::AllDead.is_met(1, 2));
        assert!(EndRule::LastStanding.is_met(1, 2));
        assert!(!EndRule::LastStanding.is_met(1, 1));
        assert!(EndRule::LastStanding.is_met(0, 1));
        assert_eq!(EndRule::from_str("Last-Standing"), Some(EndRule::LastStanding));
        assert_eq!(EndRule::from_str(EndRule::AllDead.as_str()), Some(EndRule::AllDead));
    }
}

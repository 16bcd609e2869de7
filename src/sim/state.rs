//! Round state and core simulation types
//!
//! The round owns every entity collection for its whole lifetime. Only the
//! tick pipeline and the spawner add or remove entities.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::item::Item;
use super::obstacle::Obstacle;
use super::player::{Controller, KeyBindings, Player};
use super::spawn::SpawnController;
use crate::results::RoundResult;
use crate::settings::RoundConfig;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Active gameplay
    Playing,
    /// End condition met on `since`; waiting out the grace period
    Ending { since: u64 },
    /// Round closed
    Over,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: RoundConfig,
    pub phase: RoundPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Obstacles that left the field without hitting anyone
    pub avoided: u32,
    /// Players, ordered by id
    pub players: Vec<Player>,
    pub obstacles: Vec<Obstacle>,
    /// Items waiting on the field
    pub items: Vec<Item>,
    /// Items whose effect is running
    pub active_items: Vec<Item>,
    pub spawner: SpawnController,
    pub rng: Pcg32,
    /// Background scroll offset (cosmetic)
    pub scroll: f32,
    /// Next obstacle/item id
    next_id: u32,
}

impl GameState {
    /// Start a round. Invalid settings fall back to defaults with a warning.
    pub fn new(config: RoundConfig) -> Self {
        let config = config.sanitized();
        log::info!(
            "Starting round: {} players ({} bots), {}x{} at {} ticks/s, seed {}",
            config.player_count,
            config.bot_count,
            config.width,
            config.height,
            config.tick_rate,
            config.seed
        );

        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            spawner: SpawnController::new(&config),
            phase: RoundPhase::Playing,
            time_ticks: 0,
            avoided: 0,
            players: Vec::with_capacity(config.player_count as usize),
            obstacles: Vec::new(),
            items: Vec::new(),
            active_items: Vec::new(),
            scroll: 0.0,
            next_id: 1,
            config,
        };
        state.create_players();
        state
    }

    /// Lay players out evenly across the middle row
    fn create_players(&mut self) {
        let n = self.config.player_count;
        let humans = n - self.config.bot_count;
        let y = self.config.height / 2.0;
        for i in 0..n {
            let x = (i + 1) as f32 / (n + 1) as f32 * self.config.width;
            let controller = if i < humans {
                Controller::Keyboard(KeyBindings::default())
            } else {
                Controller::Bot
            };
            self.players.push(Player::new(i, Vec2::new(x, y), controller));
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// The end condition has been met (the round may still be in its grace
    /// period)
    pub fn end_flagged(&self) -> bool {
        !matches!(self.phase, RoundPhase::Playing)
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::Over
    }

    /// Players ranked by descending score
    pub fn results(&self) -> RoundResult {
        RoundResult::from_players(&self.players, self.avoided)
    }
}

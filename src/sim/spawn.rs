//! Procedural spawning and despawn-on-exit
//!
//! Obstacles are capped, spaced by a minimum interval and gated by a per-tick
//! "1 in N" draw whose rate ramps up with the avoided count. Items use a fixed
//! interval and rate. Anything that leaves the field is swept after the scan.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::item::{Item, ItemKind};
use super::obstacle::Obstacle;
use super::state::GameState;
use crate::consts::*;
use crate::settings::RoundConfig;

/// Vertical band weights (percent), top quarter first, for bonus items.
/// Malus items use the reverse.
pub const BONUS_BAND_WEIGHTS: [u32; 4] = [50, 25, 20, 5];

/// Spawn timers and the current obstacle rate
#[derive(Debug, Clone)]
pub struct SpawnController {
    tick_rate: f32,
    obstacle_min_interval: u64,
    item_min_interval: u64,
    item_time_alive: u64,
    last_obstacle: Option<u64>,
    last_item: Option<u64>,
    /// Obstacle spawns per second, refreshed every tick
    pub obstacle_rate: f32,
}

impl SpawnController {
    pub fn new(config: &RoundConfig) -> Self {
        let tuning = &config.spawn;
        Self {
            tick_rate: config.tick_rate,
            obstacle_min_interval: config.ticks(tuning.obstacle_min_interval_secs),
            item_min_interval: config.ticks(tuning.item_min_interval_secs),
            item_time_alive: config.ticks(tuning.item_time_alive_secs),
            last_obstacle: None,
            last_item: None,
            obstacle_rate: tuning.obstacle_base_rate,
        }
    }

    /// N in the "1 in N" per-tick draw for a spawn rate given per second
    pub fn one_in(&self, rate_per_sec: f32) -> f32 {
        if rate_per_sec <= 0.0 {
            return f32::INFINITY;
        }
        (self.tick_rate / rate_per_sec).max(1.0)
    }

    pub fn item_time_alive(&self) -> u64 {
        self.item_time_alive
    }

    fn interval_elapsed(last: Option<u64>, now: u64, interval: u64) -> bool {
        last.is_none_or(|last| now.saturating_sub(last) >= interval)
    }

    fn draw(rng: &mut impl Rng, one_in: f32) -> bool {
        one_in.is_finite() && rng.random::<f32>() * one_in < 1.0
    }

    /// Decide whether an obstacle spawns this tick
    pub fn roll_obstacle(&mut self, now: u64, active: usize, max: usize, rng: &mut impl Rng) -> bool {
        if active >= max || !Self::interval_elapsed(self.last_obstacle, now, self.obstacle_min_interval) {
            return false;
        }
        if Self::draw(rng, self.one_in(self.obstacle_rate)) {
            self.last_obstacle = Some(now);
            true
        } else {
            false
        }
    }

    /// Decide whether an item spawns this tick
    pub fn roll_item(&mut self, now: u64, rate: f32, rng: &mut impl Rng) -> bool {
        if !Self::interval_elapsed(self.last_item, now, self.item_min_interval) {
            return false;
        }
        if Self::draw(rng, self.one_in(rate)) {
            self.last_item = Some(now);
            true
        } else {
            false
        }
    }
}

/// Pick a vertical quarter (0 = top) for an item
pub fn pick_band(bonus: bool, rng: &mut impl Rng) -> usize {
    let roll = rng.random_range(0..100u32);
    let mut acc = 0;
    for band in 0..BONUS_BAND_WEIGHTS.len() {
        let weight = if bonus {
            BONUS_BAND_WEIGHTS[band]
        } else {
            BONUS_BAND_WEIGHTS[BONUS_BAND_WEIGHTS.len() - 1 - band]
        };
        acc += weight;
        if roll < acc {
            return band;
        }
    }
    BONUS_BAND_WEIGHTS.len() - 1
}

/// Drop obstacles that left the field, counting the ones nobody hit
pub fn despawn_obstacles(state: &mut GameState) {
    let (width, height) = (state.config.width, state.config.height);
    let mut avoided = 0;
    state.obstacles.retain(|obstacle| {
        if obstacle.body.has_left_field(width, height) {
            if !obstacle.destroyed {
                avoided += 1;
            }
            false
        } else {
            true
        }
    });
    state.avoided += avoided;
}

/// Drop idle items nobody picked up in time
pub fn expire_idle_items(state: &mut GameState) {
    let now = state.time_ticks;
    let time_alive = state.spawner.item_time_alive();
    state.items.retain(|item| {
        let expired = item.idle_expired(now, time_alive);
        if expired {
            log::debug!("Item {} ({:?}) expired uncollected", item.id, item.kind);
        }
        !expired
    });
}

/// Ramp the obstacle rate and maybe spawn one obstacle
pub fn spawn_obstacles(state: &mut GameState) {
    let tuning = &state.config.spawn;
    state.spawner.obstacle_rate = tuning.obstacle_rate(state.avoided);

    let now = state.time_ticks;
    let max = tuning.obstacle_max;
    if !state
        .spawner
        .roll_obstacle(now, state.obstacles.len(), max, &mut state.rng)
    {
        return;
    }

    let (w, h) = OBSTACLE_SIZE;
    let tuning = &state.config.spawn;
    let x = state.rng.random_range(0.0..=(state.config.width - w).max(0.0));
    let drift = symmetric(&mut state.rng, tuning.obstacle_max_drift);
    let rotation_rate = symmetric(&mut state.rng, tuning.obstacle_max_rotation);
    let speed = tuning.obstacle_speed(state.avoided);

    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, Vec2::new(x, -h), speed, drift, rotation_rate);
    state.obstacles.push(obstacle);
}

/// Maybe spawn one item in a weighted band
pub fn spawn_items(state: &mut GameState) {
    let now = state.time_ticks;
    let rate = state.config.spawn.item_rate;
    if !state.spawner.roll_item(now, rate, &mut state.rng) {
        return;
    }

    let Some(&kind) = ItemKind::ALL.choose(&mut state.rng) else {
        return;
    };
    let (w, h) = ITEM_SIZE;
    let band = pick_band(kind.is_bonus(), &mut state.rng);
    let band_height = state.config.height / BONUS_BAND_WEIGHTS.len() as f32;
    let top = band as f32 * band_height;
    let y = state.rng.random_range(top..=top + (band_height - h).max(0.0));
    let x = state.rng.random_range(0.0..=(state.config.width - w).max(0.0));

    let id = state.next_entity_id();
    let item = Item::new(id, kind, Vec2::new(x, y), now, state.config.tick_rate);
    log::debug!("Spawned item {} ({:?}) in band {}", id, kind, band);
    state.items.push(item);
}

fn symmetric(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(-max..=max)
    } else {
        0.0
    }
}

//! Power-up items and their effect scripts
//!
//! An item sits idle on the field until a player drives over it. It then
//! records the activator and, for as long as its duration lasts, its script
//! runs once per tick against the whole player set.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, Direction};
use super::player::Player;
use crate::consts::*;

/// How an effect's changes survive the end of the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persistence {
    /// Only touches backed-up fields; undone by restore every tick
    Transient,
    /// Changes state restore does not cover; must run only once
    OneShot,
}

/// Item variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Halves every other player's speed
    Slow,
    /// One extra life for the activator
    ExtraLife,
    /// Swaps the activator's up/down and left/right
    InvertControls,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Slow, ItemKind::ExtraLife, ItemKind::InvertControls];

    /// Bonus items favour the top of the field, malus items the bottom
    pub fn is_bonus(&self) -> bool {
        match self {
            ItemKind::Slow | ItemKind::ExtraLife => true,
            ItemKind::InvertControls => false,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        match self {
            ItemKind::Slow => SLOW_DURATION_SECS,
            ItemKind::ExtraLife => EXTRA_LIFE_DURATION_SECS,
            ItemKind::InvertControls => INVERT_DURATION_SECS,
        }
    }

    pub fn persistence(&self) -> Persistence {
        match self {
            ItemKind::Slow | ItemKind::InvertControls => Persistence::Transient,
            ItemKind::ExtraLife => Persistence::OneShot,
        }
    }
}

/// A power-up, idle on the field or activated by a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub body: Body,
    /// Id of the player who picked it up
    pub activator: Option<u8>,
    pub enabled: bool,
    /// Effect lifetime once activated (ticks)
    pub duration_ticks: u64,
    /// Tick the item appeared on
    pub spawned_at: u64,
    /// Tick the item was picked up on
    pub activated_at: Option<u64>,
    /// A one-shot script has already run
    pub used: bool,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, anchor: Vec2, spawned_at: u64, tick_rate: f32) -> Self {
        Self {
            id,
            kind,
            body: Body::new(anchor, Vec2::new(ITEM_SIZE.0, ITEM_SIZE.1), 0.0, &ITEM_HITBOXES),
            activator: None,
            enabled: false,
            duration_ticks: crate::secs_to_ticks(kind.duration_secs(), tick_rate),
            spawned_at,
            activated_at: None,
            used: false,
        }
    }

    /// Record the activator and start the duration timer
    pub fn activate(&mut self, activator: u8, now: u64) {
        self.activator = Some(activator);
        self.enabled = true;
        self.activated_at = Some(now);
        self.body.collidable = false;
        log::debug!("Item {} ({:?}) activated by player {}", self.id, self.kind, activator);
    }

    /// Effect has run for all of its ticks. Activation happens during
    /// collisions, so the first applied tick is `activated_at + 1`.
    pub fn times_up(&self, now: u64) -> bool {
        match self.activated_at {
            Some(start) if self.enabled => now.saturating_sub(start) > self.duration_ticks,
            _ => false,
        }
    }

    /// Idle on the field for at least `time_alive_ticks`
    pub fn idle_expired(&self, now: u64, time_alive_ticks: u64) -> bool {
        self.activated_at.is_none() && now.saturating_sub(self.spawned_at) >= time_alive_ticks
    }

    /// Run the script if enabled and not timed out. One-shot items run once
    /// over their whole lifetime.
    pub fn apply(&mut self, players: &mut [Player], now: u64) {
        if !self.enabled || self.times_up(now) {
            return;
        }
        match self.kind.persistence() {
            Persistence::Transient => self.script(players),
            Persistence::OneShot if !self.used => {
                self.script(players);
                self.used = true;
            }
            Persistence::OneShot => {}
        }
    }

    /// Effect of this item on the player set
    fn script(&self, players: &mut [Player]) {
        let activator = self.activator;
        match self.kind {
            ItemKind::Slow => {
                for player in players.iter_mut().filter(|p| Some(p.id) != activator) {
                    player.body.speed /= 2.0;
                }
            }
            ItemKind::ExtraLife => {
                if let Some(player) = players
                    .iter_mut()
                    .find(|p| Some(p.id) == activator && p.is_alive())
                {
                    player.lives += 1;
                }
            }
            ItemKind::InvertControls => {
                if let Some(player) = players.iter_mut().find(|p| Some(p.id) == activator) {
                    if let Some(bindings) = player.bindings_mut() {
                        bindings.invert();
                    }
                }
            }
        }
    }
}

impl Actor for Item {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Items do not move
    fn move_dir(&mut self, _direction: Direction) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::{Controller, KeyBindings};

    fn players() -> Vec<Player> {
        (0..3)
            .map(|i| {
                Player::new(
                    i,
                    Vec2::new(50.0 * i as f32, 100.0),
                    Controller::Keyboard(KeyBindings::default()),
                )
            })
            .collect()
    }

    #[test]
    fn test_classification() {
        assert!(ItemKind::Slow.is_bonus());
        assert!(ItemKind::ExtraLife.is_bonus());
        assert!(!ItemKind::InvertControls.is_bonus());
        assert_eq!(ItemKind::ExtraLife.persistence(), Persistence::OneShot);
        assert_eq!(ItemKind::Slow.persistence(), Persistence::Transient);
    }

    #[test]
    fn test_items_do_not_move() {
        let mut item = Item::new(1, ItemKind::Slow, Vec2::new(10.0, 10.0), 0, 60.0);
        item.move_dir(Direction::East);
        assert_eq!(item.anchor(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_timers() {
        let mut item = Item::new(1, ItemKind::Slow, Vec2::ZERO, 10, 60.0);
        assert_eq!(item.duration_ticks, 300);
        assert!(!item.times_up(10_000));
        assert!(!item.idle_expired(489, 480));
        assert!(item.idle_expired(490, 480));

        item.activate(2, 100);
        assert!(!item.is_collidable());
        assert!(!item.idle_expired(10_000, 480));
        // Applied on ticks 101..=400
        assert!(!item.times_up(400));
        assert!(item.times_up(401));
    }

    #[test]
    fn test_slow_spares_activator() {
        let mut players = players();
        let mut item = Item::new(1, ItemKind::Slow, Vec2::ZERO, 0, 60.0);
        item.activate(2, 0);
        item.apply(&mut players, 1);
        assert_eq!(players[0].speed(), PLAYER_SPEED / 2.0);
        assert_eq!(players[1].speed(), PLAYER_SPEED);
        assert_eq!(players[2].speed(), PLAYER_SPEED / 2.0);
    }

    #[test]
    fn test_extra_life_once() {
        let mut players = players();
        let mut item = Item::new(1, ItemKind::ExtraLife, Vec2::ZERO, 0, 60.0);
        item.activate(1, 0);
        for now in 1..30 {
            item.apply(&mut players, now);
        }
        assert_eq!(players[0].lives, PLAYER_LIVES + 1);
        assert_eq!(players[1].lives, PLAYER_LIVES);
        assert!(item.used);
    }

    #[test]
    fn test_extra_life_skips_dead_activator() {
        let mut players = players();
        players[0].kill(3);
        let mut item = Item::new(1, ItemKind::ExtraLife, Vec2::ZERO, 0, 60.0);
        item.activate(1, 0);
        item.apply(&mut players, 1);
        assert_eq!(players[0].lives, PLAYER_LIVES);
        assert!(!players[0].is_alive());
    }

    #[test]
    fn test_single_tick_duration_runs_once() {
        let mut players = players();
        // 1 s at 1 tick/s
        let mut item = Item::new(1, ItemKind::ExtraLife, Vec2::ZERO, 0, 1.0);
        assert_eq!(item.duration_ticks, 1);
        item.activate(1, 5);
        assert!(!item.times_up(6));
        item.apply(&mut players, 6);
        assert!(item.times_up(7));
        item.apply(&mut players, 7);
        assert_eq!(players[0].lives, PLAYER_LIVES + 1);
    }

    #[test]
    fn test_transient_runs_every_tick() {
        let mut players = players();
        let mut item = Item::new(1, ItemKind::Slow, Vec2::ZERO, 0, 60.0);
        item.activate(1, 0);
        item.apply(&mut players, 1);
        item.apply(&mut players, 2);
        assert_eq!(players[1].speed(), PLAYER_SPEED / 4.0);
        assert!(!item.used);
    }

    #[test]
    fn test_invert_only_activator() {
        let mut players = players();
        let mut item = Item::new(1, ItemKind::InvertControls, Vec2::ZERO, 0, 60.0);
        item.activate(3, 0);
        item.apply(&mut players, 1);
        let inverted = players[2].bindings().copied().unwrap();
        assert_eq!(inverted.up, Direction::South);
        assert_eq!(inverted.left, Direction::East);
        assert_eq!(players[0].bindings(), Some(&KeyBindings::default()));
    }

    #[test]
    fn test_disabled_item_does_nothing() {
        let mut players = players();
        let mut item = Item::new(1, ItemKind::Slow, Vec2::ZERO, 0, 60.0);
        item.apply(&mut players, 1);
        assert!(players.iter().all(|p| p.speed() == PLAYER_SPEED));
    }
}

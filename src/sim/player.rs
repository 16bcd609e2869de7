//! Player entities and their controllers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body, Direction};
use crate::consts::*;

/// Maps the four physical inputs (up/left/down/right) to move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: Direction,
    pub left: Direction,
    pub down: Direction,
    pub right: Direction,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: Direction::North,
            left: Direction::West,
            down: Direction::South,
            right: Direction::East,
        }
    }
}

impl KeyBindings {
    /// Move direction produced by pressing `input`
    pub fn resolve(&self, input: Direction) -> Direction {
        match input {
            Direction::North => self.up,
            Direction::West => self.left,
            Direction::South => self.down,
            Direction::East => self.right,
        }
    }

    /// Swap up/down and left/right
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.up, &mut self.down);
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

/// Source of a player's movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    /// Not configured; the player never moves
    Unbound,
    /// Driven by external intents through remappable bindings
    Keyboard(KeyBindings),
    /// Computer player; currently stands still
    Bot,
}

/// Fields the effect system may override for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransientFields {
    pub speed: f32,
    pub bindings: Option<KeyBindings>,
}

/// A player-controlled car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// 1-based player number
    pub id: u8,
    /// Sprite skin (1..=MAX_SKINS)
    pub skin: u8,
    pub body: Body,
    pub lives: u32,
    /// Avoided-obstacle count latched at death or at round end
    pub score: Option<u32>,
    /// Last move, used to cancel it
    pub old_action: Option<Direction>,
    pub controller: Controller,
    /// Pre-effect values, held between backup and restore
    backup: Option<TransientFields>,
    #[serde(skip)]
    warned_unbound: bool,
}

impl Player {
    /// Create player `index` (0-based) at `anchor`
    pub fn new(index: u8, anchor: Vec2, controller: Controller) -> Self {
        Self {
            id: index + 1,
            skin: index % MAX_SKINS + 1,
            body: Body::new(
                anchor,
                Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
                PLAYER_SPEED,
                &PLAYER_HITBOXES,
            ),
            lives: PLAYER_LIVES,
            score: None,
            old_action: None,
            controller,
            backup: None,
            warned_unbound: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    pub fn speed(&self) -> f32 {
        self.body.speed
    }

    pub fn bindings(&self) -> Option<&KeyBindings> {
        match &self.controller {
            Controller::Keyboard(bindings) => Some(bindings),
            _ => None,
        }
    }

    pub fn bindings_mut(&mut self) -> Option<&mut KeyBindings> {
        match &mut self.controller {
            Controller::Keyboard(bindings) => Some(bindings),
            _ => None,
        }
    }

    /// Filter an external intent through the controller. Returns the raw
    /// input to act on this tick, or `None` when the player does not move.
    pub fn make_action(&mut self, intent: Option<Direction>) -> Option<Direction> {
        if !self.is_alive() {
            return None;
        }
        match self.controller {
            Controller::Keyboard(_) => intent,
            Controller::Unbound => {
                if !self.warned_unbound {
                    log::warn!("Controller not configured for player {}", self.id);
                    self.warned_unbound = true;
                }
                None
            }
            Controller::Bot => {
                log::trace!("Bot {} idles", self.id);
                None
            }
        }
    }

    /// Resolve a raw input through the current bindings and move
    pub fn steer(&mut self, input: Direction) {
        let direction = self
            .bindings()
            .map_or(input, |bindings| bindings.resolve(input));
        self.move_dir(direction);
    }

    /// Reverse the last move
    pub fn cancel_action(&mut self) {
        if let Some(last) = self.old_action {
            self.move_dir(last.opposite());
        }
    }

    /// Lose a life; dies with `avoided` as score when none are left
    pub fn hurt(&mut self, avoided: u32) {
        if !self.is_alive() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.kill(avoided);
        }
    }

    /// Die now, latching `avoided` as the final score
    pub fn kill(&mut self, avoided: u32) {
        if !self.is_alive() {
            return;
        }
        self.body.alive = false;
        self.body.collidable = false;
        self.body.speed = PLAYER_IDLE_SPEED;
        self.score = Some(avoided);
        log::info!("Player {} died with score {}", self.id, avoided);
    }

    /// Latch a survivor's score at round end
    pub fn latch_score(&mut self, avoided: u32) {
        if self.score.is_none() {
            self.score = Some(avoided);
        }
    }

    pub fn transient_fields(&self) -> TransientFields {
        TransientFields {
            speed: self.body.speed,
            bindings: self.bindings().copied(),
        }
    }

    /// Remember speed and bindings before effects run
    pub fn backup(&mut self) {
        self.backup = Some(self.transient_fields());
    }

    /// Put back what `backup` saved. Dead players go back to the idle speed
    /// `kill` pins, whatever effects did to it this tick.
    pub fn restore(&mut self) {
        let Some(saved) = self.backup.take() else {
            return;
        };
        self.body.speed = if self.is_alive() {
            saved.speed
        } else {
            PLAYER_IDLE_SPEED
        };
        if let (Some(bindings), Some(original)) = (self.bindings_mut(), saved.bindings) {
            *bindings = original;
        }
    }
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn move_dir(&mut self, direction: Direction) {
        self.body.step(direction);
        self.old_action = Some(direction);
    }
}

//! Shared actor state: position, sprite bounds, hitboxes and flags
//!
//! Players, obstacles and items all embed a [`Body`] and expose it through the
//! [`Actor`] trait, which is what the collision engine works on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{HitboxSet, Rect};

/// The four movement directions, numbered anticlockwise from east
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Direction that undoes a move in this direction
    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::South => Direction::North,
        }
    }

    /// Unit step in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::East => Vec2::X,
            Direction::North => Vec2::NEG_Y,
            Direction::West => Vec2::NEG_X,
            Direction::South => Vec2::Y,
        }
    }

    pub fn from_index(index: u8) -> Option<Direction> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Position, bounds and hitboxes of a simulated entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the sprite
    anchor: Vec2,
    /// Sprite size, used for bounds checks
    pub size: Vec2,
    /// Rotation in degrees (cosmetic, hitboxes stay axis-aligned)
    pub rotation: f32,
    /// Distance covered by one move
    pub speed: f32,
    /// Only collidable bodies take part in collisions
    pub collidable: bool,
    pub alive: bool,
    hitboxes: HitboxSet,
}

impl Body {
    pub fn new(anchor: Vec2, size: Vec2, speed: f32, hitbox_offsets: &[Rect]) -> Self {
        Self {
            anchor,
            size,
            rotation: 0.0,
            speed,
            collidable: true,
            alive: true,
            hitboxes: HitboxSet::new(hitbox_offsets, anchor),
        }
    }

    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Relocate the body; hitboxes follow
    pub fn set_position(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        self.recompute_hitboxes();
    }

    /// Shift the body by `delta`; hitboxes follow
    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.anchor + delta);
    }

    pub fn recompute_hitboxes(&mut self) {
        self.hitboxes.recompute(self.anchor);
    }

    /// Translate by `speed` along one axis
    pub fn step(&mut self, direction: Direction) {
        self.translate(direction.unit() * self.speed);
    }

    /// Sprite rectangle in playfield coordinates
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.anchor,
            size: self.size,
        }
    }

    pub fn hitboxes(&self) -> &HitboxSet {
        &self.hitboxes
    }

    /// `(x_out, y_out)` against inclusive bounds
    pub fn is_out_of_bound(&self, x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> (bool, bool) {
        self.bounds().out_of_bounds(x_min, x_max, y_min, y_max)
    }

    /// True once the sprite has fully left the `width` x `height` playfield
    /// through any edge
    pub fn has_left_field(&self, width: f32, height: f32) -> bool {
        let b = self.bounds();
        b.right() < 0.0 || b.left() > width || b.bottom() < 0.0 || b.top() > height
    }
}

/// Common capability set of every simulated entity
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn is_collidable(&self) -> bool {
        self.body().collidable
    }

    fn anchor(&self) -> Vec2 {
        self.body().anchor()
    }

    fn set_position(&mut self, anchor: Vec2) {
        self.body_mut().set_position(anchor);
    }

    /// Move one step. Entities that do not move override this.
    fn move_dir(&mut self, direction: Direction) {
        self.body_mut().step(direction);
    }
}

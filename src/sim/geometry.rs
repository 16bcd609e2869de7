//! Axis-aligned rectangles and anchor-relative hitbox sets
//!
//! A hitbox is stored twice: the original offset from the sprite origin, and
//! the live rectangle in playfield space. Live boxes are only ever derived
//! from the originals plus the current anchor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on both axes. Rectangles that only share an edge do not
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Same rectangle moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect {
            pos: self.pos + offset,
            size: self.size,
        }
    }

    /// Position that keeps a rectangle of this size inside `bounds`.
    /// Rectangles larger than `bounds` are aligned to its top-left corner.
    pub fn clamped_into(&self, bounds: &Rect) -> Vec2 {
        let max = (bounds.pos + bounds.size - self.size).max(bounds.pos);
        self.pos.clamp(bounds.pos, max)
    }

    /// `(x_out, y_out)` against inclusive bounds: an axis is out when the near
    /// edge is below the minimum or the far edge is above the maximum.
    pub fn out_of_bounds(&self, x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> (bool, bool) {
        let x_out = self.left() < x_min || self.right() > x_max;
        let y_out = self.top() < y_min || self.bottom() > y_max;
        (x_out, y_out)
    }
}

/// Hitboxes attached to one entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitboxSet {
    original: Vec<Rect>,
    live: Vec<Rect>,
}

impl HitboxSet {
    /// Build a fresh set from offset rectangles, placed at `anchor`
    pub fn new(offsets: &[Rect], anchor: Vec2) -> Self {
        let mut set = Self {
            original: offsets.to_vec(),
            live: offsets.to_vec(),
        };
        set.recompute(anchor);
        set
    }

    /// Re-derive every live box as `original + anchor`
    pub fn recompute(&mut self, anchor: Vec2) {
        debug_assert_eq!(self.original.len(), self.live.len(), "hitbox count mismatch");
        for (live, original) in self.live.iter_mut().zip(&self.original) {
            *live = original.translated(anchor);
        }
    }

    /// Live boxes in playfield coordinates, in stored order
    #[inline]
    pub fn live(&self) -> &[Rect] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

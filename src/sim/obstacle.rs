//! Falling obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Body};
use crate::consts::*;

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: Body,
    /// Hit a player; drawn wrecked and harmless from then on
    pub destroyed: bool,
    /// Horizontal drift (pixels per tick)
    pub drift: f32,
    /// Rotation rate (degrees per tick)
    pub rotation_rate: f32,
}

impl Obstacle {
    /// `speed` is the descent rate in pixels per tick
    pub fn new(id: u32, anchor: Vec2, speed: f32, drift: f32, rotation_rate: f32) -> Self {
        Self {
            id,
            body: Body::new(
                anchor,
                Vec2::new(OBSTACLE_SIZE.0, OBSTACLE_SIZE.1),
                speed,
                &OBSTACLE_HITBOXES,
            ),
            destroyed: false,
            drift,
            rotation_rate,
        }
    }

    /// Per-tick displacement
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.drift, self.body.speed)
    }

    /// Fall, drift and spin for one tick
    pub fn advance(&mut self) {
        let velocity = self.velocity();
        self.body.translate(velocity);
        self.body.rotation = (self.body.rotation + self.rotation_rate).rem_euclid(360.0);
    }

    /// Mark as wrecked; it keeps falling but can no longer hit anyone
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.body.collidable = false;
    }
}

impl Actor for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

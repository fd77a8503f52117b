//! Falling obstacles and the pool that owns them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// A falling block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px/s), fixed at spawn
    pub speed: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, size: Vec2, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size,
            speed,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Fall for `dt` seconds, with the speed scaled by `factor`
    pub fn advance(&mut self, dt: f32, factor: f32) {
        self.pos.y += (self.speed * factor * dt).max(0.0);
    }

    /// Top edge is strictly below the bottom of the screen
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}

/// Live obstacles in spawn order
#[derive(Debug, Clone, Default)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    screen_height: f32,
}

impl ObstaclePool {
    pub fn new(screen_height: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            screen_height,
        }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Move every obstacle down by its speed x dt
    pub fn advance_all(&mut self, dt: f32) {
        self.advance_all_scaled(dt, 1.0);
    }

    /// Move every obstacle down, with speeds scaled (slow power-up)
    pub fn advance_all_scaled(&mut self, dt: f32, factor: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt, factor);
        }
    }

    /// Drop obstacles whose top edge passed the screen bottom.
    /// Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.obstacles.len();
        let height = self.screen_height;
        self.obstacles.retain(|o| !o.is_off_screen(height));
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn boxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.obstacles.iter().map(Obstacle::bounding_box)
    }
}

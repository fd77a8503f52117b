//! Collectible power-ups and their timed effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::PowerUpConfig;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Player moves faster
    SpeedBoost,
    /// Obstacles fall slower
    SlowEnemies,
    /// Collisions are ignored
    Invincibility,
    /// Points are multiplied
    ScoreMultiplier,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::SpeedBoost,
        PickupKind::SlowEnemies,
        PickupKind::Invincibility,
        PickupKind::ScoreMultiplier,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PickupKind::SpeedBoost => "Speed Boost",
            PickupKind::SlowEnemies => "Slow Enemies",
            PickupKind::Invincibility => "Invincibility",
            PickupKind::ScoreMultiplier => "Score Multiplier",
        }
    }

    /// Effect duration in seconds
    pub fn duration(&self, config: &PowerUpConfig) -> f32 {
        match self {
            PickupKind::SpeedBoost => config.speed_boost_secs,
            PickupKind::SlowEnemies => config.slow_secs,
            PickupKind::Invincibility => config.invincibility_secs,
            PickupKind::ScoreMultiplier => config.score_multiplier_secs,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px/s)
    pub speed: f32,
}

impl Pickup {
    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }

    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}

/// Active power-up effects (seconds remaining, 0 = inactive)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed_boost: f32,
    pub slow: f32,
    pub invincibility: f32,
    pub score_multiplier: f32,
}

impl ActiveEffects {
    fn slot_mut(&mut self, kind: PickupKind) -> &mut f32 {
        match kind {
            PickupKind::SpeedBoost => &mut self.speed_boost,
            PickupKind::SlowEnemies => &mut self.slow,
            PickupKind::Invincibility => &mut self.invincibility,
            PickupKind::ScoreMultiplier => &mut self.score_multiplier,
        }
    }

    pub fn remaining(&self, kind: PickupKind) -> f32 {
        match kind {
            PickupKind::SpeedBoost => self.speed_boost,
            PickupKind::SlowEnemies => self.slow,
            PickupKind::Invincibility => self.invincibility,
            PickupKind::ScoreMultiplier => self.score_multiplier,
        }
    }

    pub fn is_active(&self, kind: PickupKind) -> bool {
        self.remaining(kind) > 0.0
    }

    /// Start an effect, or extend it if the new duration is longer
    pub fn activate(&mut self, kind: PickupKind, config: &PowerUpConfig) {
        let duration = kind.duration(config);
        let slot = self.slot_mut(kind);
        *slot = slot.max(duration);
    }

    /// Count effects down; returns the ones that ran out this tick
    pub fn tick(&mut self, dt: f32) -> Vec<PickupKind> {
        let mut expired = Vec::new();
        for kind in PickupKind::ALL {
            let slot = self.slot_mut(kind);
            if *slot > 0.0 {
                *slot = (*slot - dt).max(0.0);
                if *slot == 0.0 {
                    expired.push(kind);
                }
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn invincible(&self) -> bool {
        self.is_active(PickupKind::Invincibility)
    }

    pub fn player_speed_multiplier(&self, config: &PowerUpConfig) -> f32 {
        if self.is_active(PickupKind::SpeedBoost) {
            config.speed_boost_multiplier
        } else {
            1.0
        }
    }

    pub fn obstacle_speed_factor(&self, config: &PowerUpConfig) -> f32 {
        if self.is_active(PickupKind::SlowEnemies) {
            config.slow_factor
        } else {
            1.0
        }
    }

    pub fn score_multiplier(&self, config: &PowerUpConfig) -> u64 {
        if self.is_active(PickupKind::ScoreMultiplier) {
            config.score_multiplier.max(1)
        } else {
            1
        }
    }
}

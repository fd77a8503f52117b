//! The player's sprite

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// Horizontal movement requested for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Holding both keys cancels out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
            Direction::None => 0.0,
        }
    }
}

/// The player-controlled box at the bottom of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pos: Vec2,
    size: Vec2,
    /// Base speed (px/s)
    speed: f32,
    /// Rightmost allowed x
    max_x: f32,
    /// Last horizontal velocity (px/s), for renderers and the autopilot
    vel_x: f32,
}

impl Player {
    /// Spawn centered horizontally at the bottom of the screen
    pub fn spawn(config: &GameConfig) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(config.player.width, config.player.height),
            speed: config.player.speed,
            max_x: config.player_max_x(),
            vel_x: 0.0,
        };
        player.reset(config);
        player
    }

    /// Move back to the starting position
    pub fn reset(&mut self, config: &GameConfig) {
        let x = config.screen.width / 2.0 - config.player.width / 2.0;
        let y = config.screen.height - config.player.height - config.player.start_y_offset;
        self.pos = Vec2::new(x.clamp(0.0, self.max_x), y);
        self.vel_x = 0.0;
    }

    /// Move by speed x dt in the given direction, staying fully on-screen
    pub fn update(&mut self, direction: Direction, dt: f32) {
        self.update_scaled(direction, 1.0, dt);
    }

    /// Like `update`, with the speed scaled (speed boost power-up)
    pub fn update_scaled(&mut self, direction: Direction, speed_multiplier: f32, dt: f32) {
        self.vel_x = direction.sign() * self.speed * speed_multiplier;
        self.pos.x = (self.pos.x + self.vel_x * dt).clamp(0.0, self.max_x);
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    pub fn vel_x(&self) -> f32 {
        self.vel_x
    }

    /// Place the player at an x position, clamped to the screen
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x.clamp(0.0, self.max_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn narrow_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.screen.width = 400.0;
        config.player.width = 40.0;
        config
    }

    #[test]
    fn test_spawn_centered_at_bottom() {
        let config = GameConfig::default();
        let player = Player::spawn(&config);
        assert_eq!(player.pos(), Vec2::new(275.0, 730.0));
        assert_eq!(player.bounding_box(), Rect::new(275.0, 730.0, 50.0, 50.0));
    }

    #[test]
    fn test_move_left_at_wall_stays_at_zero() {
        let config = narrow_config();
        let mut player = Player::spawn(&config);
        player.set_x(0.0);
        for _ in 0..10 {
            player.update(Direction::Left, config.sim_dt());
            assert!(player.pos().x >= 0.0);
        }
        assert_eq!(player.pos().x, 0.0);
    }

    #[test]
    fn test_move_right_clamps_to_edge() {
        let config = narrow_config();
        let mut player = Player::spawn(&config);
        for _ in 0..200 {
            player.update(Direction::Right, config.sim_dt());
        }
        assert_eq!(player.pos().x, 360.0);
        assert_eq!(player.bounding_box().right(), 400.0);
    }

    #[test]
    fn test_move_distance_is_speed_times_dt() {
        let config = GameConfig::default();
        let mut player = Player::spawn(&config);
        let start = player.pos().x;
        player.update(Direction::Left, 0.1);
        assert!((start - player.pos().x - 42.0).abs() < 1e-4);
        assert_eq!(player.vel_x(), -420.0);

        player.update(Direction::None, 0.1);
        assert!((start - player.pos().x - 42.0).abs() < 1e-4);
        assert_eq!(player.vel_x(), 0.0);
    }

    #[test]
    fn test_speed_multiplier() {
        let config = GameConfig::default();
        let mut player = Player::spawn(&config);
        let start = player.pos().x;
        player.update_scaled(Direction::Right, 1.5, 0.1);
        assert!((player.pos().x - start - 63.0).abs() < 1e-4);
    }

    #[test]
    fn test_direction_from_keys() {
        assert_eq!(Direction::from_keys(true, false), Direction::Left);
        assert_eq!(Direction::from_keys(false, true), Direction::Right);
        assert_eq!(Direction::from_keys(true, true), Direction::None);
        assert_eq!(Direction::from_keys(false, false), Direction::None);
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::None)
        ]
    }

    proptest! {
        #[test]
        fn stays_on_screen(moves in prop::collection::vec(arb_direction(), 0..400)) {
            let config = narrow_config();
            let mut player = Player::spawn(&config);
            for direction in moves {
                player.update(direction, config.sim_dt());
                prop_assert!(player.pos().x >= 0.0);
                prop_assert!(player.pos().x <= config.player_max_x());
            }
        }
    }
}

//! Difficulty curve
//!
//! A step function of a progress value (score or whole seconds survived):
//! each threshold reached unlocks one level, and the level scales obstacle
//! fall speed up and the spawn interval down. Both are clamped, so fall
//! speed never drops below base and the interval never goes under its floor.

use serde::{Deserialize, Serialize};

use crate::config::{DifficultyDriver, GameConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyCurve {
    driver: DifficultyDriver,
    thresholds: Vec<u64>,
    max_level: u32,
    speed_scale: f32,
    base_interval: f32,
    min_interval: f32,
    interval_step: f32,
}

impl DifficultyCurve {
    pub fn from_config(config: &GameConfig) -> Self {
        let difficulty = &config.difficulty;
        let reachable = difficulty.level_thresholds.len().max(1) as u32;
        if difficulty.max_level > reachable {
            log::warn!(
                "max_level {} exceeds the {} configured thresholds; capping at {}",
                difficulty.max_level,
                reachable,
                reachable
            );
        }
        Self {
            driver: difficulty.driver,
            thresholds: difficulty.level_thresholds.clone(),
            max_level: difficulty.max_level.clamp(1, reachable),
            speed_scale: difficulty.speed_scale.max(0.0),
            base_interval: config.spawn.base_interval,
            min_interval: config.spawn.min_interval,
            interval_step: difficulty.interval_step.max(0.0),
        }
    }

    /// Progress value fed to `level_for`
    pub fn progress(&self, score: u64, elapsed_secs: f64) -> u64 {
        match self.driver {
            DifficultyDriver::Score => score,
            DifficultyDriver::ElapsedSeconds => elapsed_secs.max(0.0).floor() as u64,
        }
    }

    /// Level for a progress value, in [1, max_level]
    pub fn level_for(&self, progress: u64) -> u32 {
        let reached = self.thresholds.iter().take_while(|&&t| progress >= t).count() as u32;
        reached.clamp(1, self.max_level)
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Fall speed multiplier; 1.0 at level 1
    pub fn speed_multiplier(&self, level: u32) -> f32 {
        let steps = self.clamp_level(level) - 1;
        1.0 + self.speed_scale * steps as f32
    }

    /// Seconds between spawns at this level
    pub fn spawn_interval(&self, level: u32) -> f32 {
        let steps = self.clamp_level(level) - 1;
        (self.base_interval - self.interval_step * steps as f32).max(self.min_interval)
    }

    /// Spawn rate for HUD display
    pub fn spawns_per_second(&self, level: u32) -> f32 {
        1.0 / self.spawn_interval(level)
    }

    fn clamp_level(&self, level: u32) -> u32 {
        level.clamp(1, self.max_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_levels_follow_thresholds() {
        let curve = DifficultyCurve::from_config(&GameConfig::default());
        assert_eq!(curve.level_for(0), 1);
        assert_eq!(curve.level_for(19), 1);
        assert_eq!(curve.level_for(20), 2);
        assert_eq!(curve.level_for(79), 3);
        assert_eq!(curve.level_for(80), 4);
        assert_eq!(curve.level_for(5120), 10);
        assert_eq!(curve.level_for(u64::MAX), 10);
    }

    #[test]
    fn test_speed_and_interval_scaling() {
        let curve = DifficultyCurve::from_config(&GameConfig::default());
        assert_eq!(curve.speed_multiplier(1), 1.0);
        assert!((curve.speed_multiplier(3) - 1.2).abs() < 1e-6);
        assert!((curve.spawn_interval(1) - 0.5).abs() < 1e-6);
        assert!((curve.spawn_interval(2) - 0.46).abs() < 1e-6);
        assert!((curve.spawns_per_second(1) - 2.0).abs() < 1e-5);
        // Level 10 would be 0.14, still above the 8/60 floor
        assert!(curve.spawn_interval(10) >= 8.0 / 60.0);
    }

    #[test]
    fn test_interval_floor() {
        let mut config = GameConfig::default();
        config.difficulty.interval_step = 0.2;
        let curve = DifficultyCurve::from_config(&config);
        assert_eq!(curve.spawn_interval(10), config.spawn.min_interval);
    }

    #[test]
    fn test_max_level_capped_by_thresholds() {
        let mut config = GameConfig::default();
        config.difficulty.level_thresholds = vec![0, 10];
        config.difficulty.max_level = 50;
        let curve = DifficultyCurve::from_config(&config);
        assert_eq!(curve.max_level(), 2);
        assert_eq!(curve.level_for(1_000_000), 2);
        assert!((curve.speed_multiplier(50) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_driver_uses_whole_seconds() {
        let mut config = GameConfig::default();
        config.difficulty.driver = DifficultyDriver::ElapsedSeconds;
        let curve = DifficultyCurve::from_config(&config);
        assert_eq!(curve.progress(999, 19.99), 19);
        assert_eq!(curve.progress(0, 20.0), 20);
        assert_eq!(curve.level_for(curve.progress(0, 20.0)), 2);
    }

    proptest! {
        #[test]
        fn difficulty_is_monotonic_and_bounded(a in 0u64..20_000, b in 0u64..20_000) {
            let config = GameConfig::default();
            let curve = DifficultyCurve::from_config(&config);
            let (lo, hi) = (a.min(b), a.max(b));
            let (l_lo, l_hi) = (curve.level_for(lo), curve.level_for(hi));
            prop_assert!(l_lo <= l_hi);
            prop_assert!(curve.speed_multiplier(l_lo) <= curve.speed_multiplier(l_hi));
            prop_assert!(curve.spawn_interval(l_lo) >= curve.spawn_interval(l_hi));
            prop_assert!(curve.speed_multiplier(l_lo) >= 1.0);
            prop_assert!(curve.spawn_interval(l_hi) >= config.spawn.min_interval);
            prop_assert!(curve.spawn_interval(l_lo) <= config.spawn.base_interval);
        }
    }
}

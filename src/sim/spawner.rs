//! Obstacle spawning
//!
//! A countdown drops one obstacle at a uniformly random x whenever it runs
//! out, then rearms with the interval for the current difficulty level.
//! At higher levels extra bursts arrive in one of several placement
//! patterns. Every x is clamped to [0, screen_width - obstacle_width].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::obstacle::{Obstacle, ObstaclePool};
use crate::config::{BurstConfig, GameConfig};

/// Slack for float drift when the countdown lands on zero
const COUNTDOWN_EPSILON: f32 = 1e-4;
/// Random jitter applied to wave positions (px)
const WAVE_JITTER: f32 = 20.0;
/// Max distance from the cluster center (px)
const CLUSTER_SPREAD: f32 = 30.0;

/// Placement of multi-obstacle spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnPattern {
    #[default]
    Random,
    /// Evenly spread across the middle 80% of the screen
    Wave,
    /// Bunched around one random center
    Clustered,
    /// Left third, right third, left third...
    Alternating,
}

impl SpawnPattern {
    pub const ALL: [SpawnPattern; 4] = [
        SpawnPattern::Random,
        SpawnPattern::Wave,
        SpawnPattern::Clustered,
        SpawnPattern::Alternating,
    ];

    /// Next pattern in rotation
    pub fn next(self) -> Self {
        match self {
            SpawnPattern::Random => SpawnPattern::Wave,
            SpawnPattern::Wave => SpawnPattern::Clustered,
            SpawnPattern::Clustered => SpawnPattern::Alternating,
            SpawnPattern::Alternating => SpawnPattern::Random,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPattern::Random => "random",
            SpawnPattern::Wave => "wave",
            SpawnPattern::Clustered => "clustered",
            SpawnPattern::Alternating => "alternating",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spawner {
    curve: DifficultyCurve,
    screen_width: f32,
    obstacle_size: Vec2,
    min_speed: f32,
    max_speed: f32,
    initial_delay: f32,
    burst: BurstConfig,
    patterns_enabled: bool,
    pattern_change_interval: u64,

    /// Seconds until the next regular spawn
    countdown: f32,
    pattern: SpawnPattern,
    /// Score at the last pattern change
    pattern_mark: u64,
    /// Score at the last burst
    burst_mark: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            curve: DifficultyCurve::from_config(config),
            screen_width: config.screen.width,
            obstacle_size: Vec2::new(config.obstacle.width, config.obstacle.height),
            min_speed: config.obstacle.min_speed,
            max_speed: config.obstacle.max_speed,
            initial_delay: config.spawn.initial_delay,
            burst: config.spawn.burst.clone(),
            patterns_enabled: config.spawn.patterns_enabled,
            pattern_change_interval: config.spawn.pattern_change_interval,
            countdown: config.spawn.initial_delay,
            pattern: SpawnPattern::Random,
            pattern_mark: 0,
            burst_mark: 0,
        }
    }

    /// Back to the session-start state
    pub fn reset(&mut self) {
        self.countdown = self.initial_delay;
        self.pattern = SpawnPattern::Random;
        self.pattern_mark = 0;
        self.burst_mark = 0;
    }

    pub fn curve(&self) -> &DifficultyCurve {
        &self.curve
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    pub fn pattern(&self) -> SpawnPattern {
        self.pattern
    }

    /// Run the countdown for `dt` seconds; spawns at most one obstacle.
    /// Returns the number spawned.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        level: u32,
        rng: &mut R,
        pool: &mut ObstaclePool,
    ) -> u32 {
        self.countdown -= dt;
        if self.countdown > COUNTDOWN_EPSILON {
            return 0;
        }

        let x = self.random_x(rng);
        pool.push(self.make_obstacle(x, level, rng));
        self.countdown = self.curve.spawn_interval(level);
        1
    }

    /// Spawn a burst if one is due at this score and level.
    /// Returns the number spawned.
    pub fn maybe_burst<R: Rng>(
        &mut self,
        score: u64,
        level: u32,
        rng: &mut R,
        pool: &mut ObstaclePool,
    ) -> u32 {
        if !self.burst.enabled || level < self.burst.activation_level || self.burst.count == 0 {
            return 0;
        }
        if score.saturating_sub(self.burst_mark) < self.burst.score_interval {
            return 0;
        }
        self.burst_mark = score;

        let positions = self.spawn_positions(self.burst.count, rng);
        for &x in &positions {
            pool.push(self.make_obstacle(x, level, rng));
        }
        log::debug!(
            "Burst of {} ({} pattern) at score {}",
            positions.len(),
            self.pattern.as_str(),
            score
        );
        positions.len() as u32
    }

    /// Rotate the pattern if enough score has accumulated since the last change
    pub fn update_pattern(&mut self, score: u64) -> Option<SpawnPattern> {
        if !self.patterns_enabled {
            return None;
        }
        if score.saturating_sub(self.pattern_mark) < self.pattern_change_interval {
            return None;
        }
        self.pattern = self.pattern.next();
        self.pattern_mark = score;
        Some(self.pattern)
    }

    /// X positions for `count` obstacles in the current pattern.
    /// Single spawns are always uniformly random.
    pub fn spawn_positions<R: Rng>(&self, count: u32, rng: &mut R) -> Vec<f32> {
        if count <= 1 {
            return (0..count).map(|_| self.random_x(rng)).collect();
        }

        let width = self.screen_width;
        let max_x = self.max_x();
        match self.pattern {
            SpawnPattern::Random => (0..count).map(|_| self.random_x(rng)).collect(),
            SpawnPattern::Wave => (0..count)
                .map(|i| {
                    let progress = i as f32 / (count - 1) as f32;
                    let x = width * 0.1 + width * 0.8 * progress;
                    let jitter = uniform(rng, -WAVE_JITTER, WAVE_JITTER);
                    (x + jitter).clamp(0.0, max_x)
                })
                .collect(),
            SpawnPattern::Clustered => {
                let lo = self.obstacle_size.x.min(max_x);
                let center = uniform(rng, lo, max_x);
                (0..count)
                    .map(|_| {
                        let offset = uniform(rng, -CLUSTER_SPREAD, CLUSTER_SPREAD);
                        (center + offset).clamp(0.0, max_x)
                    })
                    .collect()
            }
            SpawnPattern::Alternating => (0..count)
                .map(|i| {
                    let x = if i % 2 == 0 {
                        uniform(rng, 0.0, width / 3.0)
                    } else {
                        uniform(rng, (2.0 * width / 3.0).min(max_x), max_x)
                    };
                    x.clamp(0.0, max_x)
                })
                .collect(),
        }
    }

    fn max_x(&self) -> f32 {
        (self.screen_width - self.obstacle_size.x).max(0.0)
    }

    fn random_x<R: Rng>(&self, rng: &mut R) -> f32 {
        uniform(rng, 0.0, self.max_x())
    }

    fn make_obstacle<R: Rng>(&self, x: f32, level: u32, rng: &mut R) -> Obstacle {
        let base = uniform(rng, self.min_speed, self.max_speed);
        let speed = base * self.curve.speed_multiplier(level);
        Obstacle::new(x, 0.0, self.obstacle_size, speed)
    }
}

/// Uniform sample in [lo, hi]; collapses to `lo` for empty ranges
pub(crate) fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        lo
    } else {
        rng.random_range(lo..=hi)
    }
}

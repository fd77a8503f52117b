//! Game tuning
//!
//! Loaded once at startup (defaults or a JSON file) and immutable for the
//! rest of the run. All speeds are pixels per second, all intervals seconds.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How points are awarded while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// One point per obstacle that falls off the bottom of the screen
    #[default]
    #[value(name = "dodged", alias = "obstacles_dodged")]
    ObstaclesDodged,
    /// One point per tick survived
    #[value(name = "survival", aliases = ["survival_ticks", "time"])]
    SurvivalTicks,
}

impl ScoringRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::ObstaclesDodged => "dodged",
            ScoringRule::SurvivalTicks => "survival",
        }
    }
}

/// Which progress value drives the difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyDriver {
    #[default]
    Score,
    /// Whole seconds survived in the current session
    ElapsedSeconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// Simulation and render rate (Hz)
    pub fps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 800.0,
            fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Gap between the player's bottom edge and the screen bottom
    pub start_y_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            speed: 420.0,
            start_y_offset: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f32,
    pub height: f32,
    /// Base fall speed range before difficulty scaling
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            min_speed: 300.0,
            max_speed: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub enabled: bool,
    /// Difficulty level at which bursts start
    pub activation_level: u32,
    /// Obstacles per burst
    pub count: u32,
    /// Score points between bursts
    pub score_interval: u64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            activation_level: 5,
            count: 3,
            score_interval: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Spawn interval at level 1
    pub base_interval: f32,
    /// Floor for the spawn interval at high levels
    pub min_interval: f32,
    /// Countdown value at session start
    pub initial_delay: f32,
    pub burst: BurstConfig,
    /// Rotate multi-obstacle spawn patterns as score climbs
    pub patterns_enabled: bool,
    /// Score points between pattern changes
    pub pattern_change_interval: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_interval: 0.5,
            min_interval: 8.0 / 60.0,
            initial_delay: 0.5,
            burst: BurstConfig::default(),
            patterns_enabled: true,
            pattern_change_interval: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub driver: DifficultyDriver,
    /// Progress needed for each level, ascending; entry `i` unlocks level `i + 1`
    pub level_thresholds: Vec<u64>,
    pub max_level: u32,
    /// Fall speed multiplier gained per level above 1
    pub speed_scale: f32,
    /// Seconds removed from the spawn interval per level above 1
    pub interval_step: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            driver: DifficultyDriver::Score,
            level_thresholds: vec![0, 20, 40, 80, 160, 320, 640, 1280, 2560, 5120],
            max_level: 10,
            speed_scale: 0.1,
            interval_step: 0.04,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    pub enabled: bool,
    /// Chance that an obstacle spawn also drops a pickup
    pub spawn_chance: f64,
    pub size: f32,
    pub fall_speed: f32,
    pub speed_boost_secs: f32,
    pub speed_boost_multiplier: f32,
    pub slow_secs: f32,
    /// Obstacle advance is multiplied by this while slowed
    pub slow_factor: f32,
    pub invincibility_secs: f32,
    pub score_multiplier_secs: f32,
    pub score_multiplier: u64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            spawn_chance: 0.05,
            size: 30.0,
            fall_speed: 120.0,
            speed_boost_secs: 5.0,
            speed_boost_multiplier: 1.5,
            slow_secs: 4.0,
            slow_factor: 0.5,
            invincibility_secs: 3.0,
            score_multiplier_secs: 6.0,
            score_multiplier: 2,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub obstacle: ObstacleConfig,
    pub spawn: SpawnConfig,
    pub difficulty: DifficultyConfig,
    pub scoring: ScoringRule,
    pub power_ups: PowerUpConfig,
}

impl GameConfig {
    /// Fixed simulation timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.screen.fps as f32
    }

    /// Rightmost x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        (self.screen.width - self.player.width).max(0.0)
    }

    /// Rightmost x an obstacle may spawn at
    pub fn obstacle_max_x(&self) -> f32 {
        (self.screen.width - self.obstacle.width).max(0.0)
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid game config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json_str(&json)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize game config")
    }

    /// Reject tunings the simulation cannot honor
    pub fn validate(&self) -> Result<()> {
        let non_finite = self.float_fields().into_iter().find(|(_, v)| !v.is_finite());
        if let Some((name, value)) = non_finite {
            bail!("{name} must be a finite number, got {value}");
        }

        let screen = &self.screen;
        if screen.width <= 0.0 || screen.height <= 0.0 {
            bail!("screen size must be positive, got {}x{}", screen.width, screen.height);
        }
        if screen.fps == 0 {
            bail!("screen.fps must be > 0");
        }

        let player = &self.player;
        if player.width <= 0.0 || player.height <= 0.0 || player.speed <= 0.0 {
            bail!("player size and speed must be positive");
        }
        if player.width > screen.width {
            bail!("player ({}) is wider than the screen ({})", player.width, screen.width);
        }
        if player.height + player.start_y_offset > screen.height || player.start_y_offset < 0.0 {
            bail!("player does not fit vertically on the screen");
        }

        let obstacle = &self.obstacle;
        if obstacle.width <= 0.0 || obstacle.height <= 0.0 {
            bail!("obstacle size must be positive");
        }
        if obstacle.width > screen.width {
            bail!("obstacle ({}) is wider than the screen ({})", obstacle.width, screen.width);
        }
        if obstacle.min_speed <= 0.0 || obstacle.max_speed < obstacle.min_speed {
            bail!(
                "obstacle speed range must satisfy 0 < min <= max, got {}..={}",
                obstacle.min_speed,
                obstacle.max_speed
            );
        }

        let spawn = &self.spawn;
        if spawn.min_interval <= 0.0 || spawn.base_interval < spawn.min_interval {
            bail!(
                "spawn interval must satisfy 0 < min <= base, got min={} base={}",
                spawn.min_interval,
                spawn.base_interval
            );
        }
        if spawn.initial_delay < 0.0 {
            bail!("spawn.initial_delay must be >= 0");
        }
        if spawn.burst.enabled && spawn.burst.score_interval == 0 {
            bail!("spawn.burst.score_interval must be > 0");
        }
        if spawn.patterns_enabled && spawn.pattern_change_interval == 0 {
            bail!("spawn.pattern_change_interval must be > 0");
        }

        let difficulty = &self.difficulty;
        if difficulty.level_thresholds.is_empty() {
            bail!("difficulty.level_thresholds must not be empty");
        }
        if difficulty.level_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            bail!("difficulty.level_thresholds must be strictly ascending");
        }
        if difficulty.max_level == 0 {
            bail!("difficulty.max_level must be >= 1");
        }
        if difficulty.speed_scale < 0.0 || difficulty.interval_step < 0.0 {
            bail!("difficulty scaling factors must not be negative");
        }

        let power_ups = &self.power_ups;
        if !(0.0..=1.0).contains(&power_ups.spawn_chance) {
            bail!("power_ups.spawn_chance must be within [0, 1]");
        }
        if power_ups.enabled {
            if power_ups.size <= 0.0
                || power_ups.size > screen.width
                || power_ups.fall_speed <= 0.0
            {
                bail!("power-up size and fall speed must be positive and fit the screen");
            }
            if power_ups.slow_factor <= 0.0 || power_ups.speed_boost_multiplier <= 0.0 {
                bail!("power-up multipliers must be positive");
            }
        }

        Ok(())
    }

    /// Every float tunable, by its JSON path
    fn float_fields(&self) -> [(&'static str, f64); 24] {
        let (screen, player, obstacle) = (&self.screen, &self.player, &self.obstacle);
        let (spawn, difficulty, power_ups) = (&self.spawn, &self.difficulty, &self.power_ups);
        [
            ("screen.width", screen.width as f64),
            ("screen.height", screen.height as f64),
            ("player.width", player.width as f64),
            ("player.height", player.height as f64),
            ("player.speed", player.speed as f64),
            ("player.start_y_offset", player.start_y_offset as f64),
            ("obstacle.width", obstacle.width as f64),
            ("obstacle.height", obstacle.height as f64),
            ("obstacle.min_speed", obstacle.min_speed as f64),
            ("obstacle.max_speed", obstacle.max_speed as f64),
            ("spawn.base_interval", spawn.base_interval as f64),
            ("spawn.min_interval", spawn.min_interval as f64),
            ("spawn.initial_delay", spawn.initial_delay as f64),
            ("difficulty.speed_scale", difficulty.speed_scale as f64),
            ("difficulty.interval_step", difficulty.interval_step as f64),
            ("power_ups.spawn_chance", power_ups.spawn_chance),
            ("power_ups.size", power_ups.size as f64),
            ("power_ups.fall_speed", power_ups.fall_speed as f64),
            ("power_ups.speed_boost_secs", power_ups.speed_boost_secs as f64),
            ("power_ups.speed_boost_multiplier", power_ups.speed_boost_multiplier as f64),
            ("power_ups.slow_secs", power_ups.slow_secs as f64),
            ("power_ups.slow_factor", power_ups.slow_factor as f64),
            ("power_ups.invincibility_secs", power_ups.invincibility_secs as f64),
            ("power_ups.score_multiplier_secs", power_ups.score_multiplier_secs as f64),
        ]
    }
}

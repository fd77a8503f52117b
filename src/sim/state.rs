//! Game state and core simulation types
//!
//! `GameState` is the game controller: it owns the player, the obstacle
//! pool, the spawner and the RNG. Renderers only get read access.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyCurve;
use super::obstacle::{Obstacle, ObstaclePool};
use super::player::Player;
use super::powerup::{ActiveEffects, Pickup, PickupKind};
use super::spawner::{SpawnPattern, Spawner};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart or quit
    GameOver,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { count: u32 },
    /// Obstacles fell off the bottom of the screen
    Dodged { count: u32 },
    LevelUp { level: u32 },
    PatternChanged { pattern: SpawnPattern },
    PickupCollected { kind: PickupKind },
    EffectExpired { kind: PickupKind },
    GameOver { score: u64, level: u32, ticks: u64 },
    Restarted { session: u32 },
}

/// Complete game state (deterministic for a given config, seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    pub(crate) level: u32,
    /// Ticks simulated in the current session
    pub(crate) time_ticks: u64,
    /// Seconds simulated in the current session
    pub(crate) elapsed_secs: f64,
    /// 1-based session counter, bumped on restart
    pub(crate) session: u32,
    pub(crate) player: Player,
    pub(crate) obstacles: ObstaclePool,
    pub(crate) spawner: Spawner,
    pub(crate) pickups: Vec<Pickup>,
    pub(crate) effects: ActiveEffects,
    /// Score recorded at the moment of the last game over
    pub(crate) final_score: Option<u64>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let player = Player::spawn(&config);
        let obstacles = ObstaclePool::new(config.screen.height);
        let spawner = Spawner::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            time_ticks: 0,
            elapsed_secs: 0.0,
            session: 1,
            player,
            obstacles,
            spawner,
            pickups: Vec::new(),
            effects: ActiveEffects::default(),
            final_score: None,
            events: Vec::new(),
        }
    }

    /// Start a fresh session. Only valid from `GameOver`; returns whether
    /// the restart happened. The RNG stream carries on so each session
    /// sees a different obstacle sequence.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.player.reset(&self.config);
        self.obstacles.clear();
        self.pickups.clear();
        self.effects.clear();
        self.spawner.reset();
        self.score = 0;
        self.level = 1;
        self.time_ticks = 0;
        self.elapsed_secs = 0.0;
        self.session += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted {
            session: self.session,
        });
        log::info!("Session {} started", self.session);
        true
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn final_score(&self) -> Option<u64> {
        self.final_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    pub fn difficulty(&self) -> &DifficultyCurve {
        self.spawner.curve()
    }

    pub fn spawn_pattern(&self) -> SpawnPattern {
        self.spawner.pattern()
    }

    /// Current regular spawn rate, for the HUD
    pub fn spawns_per_second(&self) -> f32 {
        self.difficulty().spawns_per_second(self.level)
    }
}

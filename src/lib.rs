//! Dodge Blocks - a falling-block survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, game state)
//! - `renderer`: Backend-agnostic draw lists and vertex tessellation
//! - `platform`: Fixed-timestep loop and frontend abstraction
//! - `config`: Data-driven game tuning

pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{DifficultyDriver, GameConfig, ScoringRule};
pub use highscores::HighScores;

/// Loop constants that are not part of the tunable config
pub mod consts {
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the loop accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Seed used when the caller has no preference
    pub const DEFAULT_SEED: u64 = 0x5EED_B10C;
}

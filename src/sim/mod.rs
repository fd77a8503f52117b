//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use difficulty::DifficultyCurve;
pub use obstacle::{Obstacle, ObstaclePool};
pub use player::{Direction, Player};
pub use powerup::{ActiveEffects, Pickup, PickupKind};
pub use rect::Rect;
pub use spawner::{SpawnPattern, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities carry monotone ids)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::circles_intersect;
pub use state::{Asteroid, GameEvent, GamePhase, GameState, Laser, Ship, Thrust};
pub use tick::{TickInput, spawn_wave, tick};

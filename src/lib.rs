//! Toro Blast - a toroidal-arena asteroids shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, waves, game state)
//! - `renderer`: Immediate-mode wireframe rendering
//! - `audio`: Procedurally synthesized one-shot sound effects
//! - `settings`: Startup configuration

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Milliseconds per simulation tick
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (the toroidal plane)
    pub const ARENA_W: f32 = 960.0;
    pub const ARENA_H: f32 = 720.0;

    /// Ship defaults (velocities are px/tick)
    pub const SHIP_RADIUS: f32 = 12.0;
    pub const SHIP_THRUST: f32 = 0.18;
    /// Back/strafe thrust as a fraction of forward thrust
    pub const SHIP_SIDE_THRUST: f32 = 0.6;
    pub const SHIP_FRICTION: f32 = 0.992;
    pub const SHIP_MAX_SPEED: f32 = 6.0;
    /// Nose offset along the facing angle, as a multiple of the radius
    pub const SHIP_NOSE_OFFSET: f32 = 1.8;
    /// Invulnerability window after a respawn (ms)
    pub const INVULN_MS: f64 = 1500.0;
    pub const START_LIVES: u32 = 3;

    /// Laser defaults
    pub const LASER_SPEED: f32 = 9.0;
    pub const LASER_RADIUS: f32 = 3.0;
    pub const LASER_COOLDOWN_MS: f64 = 180.0;
    pub const LASER_TTL_MS: f64 = 1200.0;

    /// Asteroid defaults
    pub const ASTEROID_MIN_RADIUS: f32 = 16.0;
    pub const ASTEROID_MAX_RADIUS: f32 = 60.0;
    /// Fraction of the parent radius inherited by split children
    pub const ASTEROID_SPLIT_FACTOR: f32 = 0.55;
    pub const ASTEROID_CHILD_VARIANCE: f32 = 0.15;
    pub const ASTEROID_SPEED_BASE: f32 = 1.2;

    /// Wave spawning
    pub const WAVE_BASE_COUNT: u32 = 5;
    pub const WAVE_MAX_COUNT: u32 = 12;
    /// One extra asteroid per this many points of score
    pub const WAVE_SCORE_STEP: u32 = 15;
    /// Minimum spawn distance from the ship
    pub const WAVE_SAFE_DIST: f32 = 200.0;
    /// Keep wave spawns away from the arena edges
    pub const WAVE_EDGE_MARGIN: f32 = 80.0;
}

#[inline]
fn wrap_axis(v: f32, limit: f32) -> f32 {
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    let wrapped = v.rem_euclid(limit);
    if wrapped >= limit { 0.0 } else { wrapped }
}

/// Wrap a position onto the toroidal arena; both coordinates re-enter from
/// the opposite edge, result always in `[0, W) x [0, H)`.
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, consts::ARENA_W),
        wrap_axis(pos.y, consts::ARENA_H),
    )
}

/// Vector of length `magnitude` pointing along `angle` radians
#[inline]
pub fn vec_from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

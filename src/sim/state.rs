//! Game state and core simulation types
//!
//! Everything that drives a session lives here; the tick module mutates it.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::{vec_from_angle, wrap_position};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended until the pause toggle fires again
    Paused,
    /// Session ended, awaiting a restart
    GameOver,
}

/// One-shot things that happened during a tick, drained by the shell for
/// audio cues. The sim never waits on their consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A laser left the ship's nose
    LaserFired,
    /// An asteroid was shot apart
    AsteroidDestroyed,
    /// The ship was hit and respawned (or the session ended)
    ShipDestroyed,
}

/// Active directional thrust inputs for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct Thrust {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle in radians, recomputed from the aim target every tick
    pub angle: f32,
    pub radius: f32,
    /// The ship cannot register collisions before this deadline (ms)
    pub invuln_until_ms: f64,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    /// A fresh ship at rest in the arena center
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ARENA_W / 2.0, ARENA_H / 2.0),
            vel: Vec2::ZERO,
            angle: 0.0,
            radius: SHIP_RADIUS,
            invuln_until_ms: 0.0,
        }
    }

    /// Respawn at the arena center with a fresh invulnerability window
    pub fn respawn(&mut self, now_ms: f64) {
        *self = Self::new();
        self.invuln_until_ms = now_ms + INVULN_MS;
    }

    /// Whether the ship can currently register collisions
    pub fn hittable(&self, now_ms: f64) -> bool {
        now_ms >= self.invuln_until_ms
    }

    /// Nose position, where lasers spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + vec_from_angle(self.angle, self.radius * SHIP_NOSE_OFFSET)
    }

    /// Advance the ship one tick.
    ///
    /// Ordering is load-bearing: accumulate thrust, clamp speed, apply
    /// friction, integrate, wrap. Friction must come after the clamp or the
    /// effective top speed drifts.
    pub fn advance(&mut self, thrust: Thrust, aim: Vec2) {
        self.angle = (aim.y - self.pos.y).atan2(aim.x - self.pos.x);

        if thrust.forward {
            self.vel += vec_from_angle(self.angle, SHIP_THRUST);
        }
        if thrust.back {
            self.vel += vec_from_angle(self.angle + PI, SHIP_THRUST * SHIP_SIDE_THRUST);
        }
        if thrust.left {
            self.vel += vec_from_angle(self.angle - FRAC_PI_2, SHIP_THRUST * SHIP_SIDE_THRUST);
        }
        if thrust.right {
            self.vel += vec_from_angle(self.angle + FRAC_PI_2, SHIP_THRUST * SHIP_SIDE_THRUST);
        }

        let speed = self.vel.length();
        if speed > SHIP_MAX_SPEED {
            self.vel *= SHIP_MAX_SPEED / speed;
        }
        self.vel *= SHIP_FRICTION;

        self.pos = wrap_position(self.pos + self.vel);
    }
}

/// A laser bolt
#[derive(Debug, Clone)]
pub struct Laser {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub born_ms: f64,
    pub alive: bool,
}

impl Laser {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, now_ms: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: LASER_RADIUS,
            born_ms: now_ms,
            alive: true,
        }
    }

    /// Advance one tick; bolts die when their time-to-live elapses
    pub fn advance(&mut self, now_ms: f64) {
        self.pos = wrap_position(self.pos + self.vel);
        if now_ms - self.born_ms > LASER_TTL_MS {
            self.alive = false;
        }
    }
}

/// A drifting rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Asteroid {
    pub fn new(id: u32, pos: Vec2, radius: f32, vel: Vec2) -> Self {
        debug_assert!(radius > 0.0, "asteroid radius must be positive");
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Advance one tick; velocity is constant for the asteroid's lifetime
    pub fn advance(&mut self) {
        self.pos = wrap_position(self.pos + self.vel);
    }

    /// Score awarded for destroying this rock; smaller rocks are worth more
    pub fn score_value(&self) -> u32 {
        (((ASTEROID_MAX_RADIUS - self.radius) / 5.0) as u32).max(1)
    }
}

/// Complete game session state (deterministic)
#[derive(Debug)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded generator threaded through every spawn/split decision
    pub rng: Pcg32,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Simulation tick counter; the clock all deadlines compare against
    pub time_ticks: u64,
    pub last_shot_ms: f64,
    pub ship: Ship,
    pub lasers: Vec<Laser>,
    pub asteroids: Vec<Asteroid>,
    /// One-shot events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session. The first wave spawns on the first tick,
    /// through the same empty-field trigger that drives every later wave.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Playing,
            time_ticks: 0,
            // negative so the very first shot clears the cooldown
            last_shot_ms: -LASER_COOLDOWN_MS,
            ship: Ship::new(),
            lasers: Vec::new(),
            asteroids: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Current simulation time in milliseconds, derived from the tick counter
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * TICK_MS
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fully reinitialize every owned entity and counter for a restart,
    /// keeping the aggregate in place rather than reconstructing it.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Fire a laser from the ship's nose if the cooldown allows it.
    /// Rejected attempts are silently ignored.
    pub fn try_fire(&mut self) {
        let now = self.now_ms();
        if now - self.last_shot_ms < LASER_COOLDOWN_MS {
            return;
        }
        self.last_shot_ms = now;
        let vel = vec_from_angle(self.ship.angle, LASER_SPEED);
        let nose = self.ship.nose();
        let id = self.next_entity_id();
        self.lasers.push(Laser::new(id, nose, vel, now));
        self.events.push(GameEvent::LaserFired);
    }

    /// Break a destroyed asteroid into children. Rocks at the minimum
    /// radius are terminal and yield none.
    pub fn split_asteroid(&mut self, parent: &Asteroid) -> Vec<Asteroid> {
        if parent.radius <= ASTEROID_MIN_RADIUS {
            return Vec::new();
        }

        // 2:1 bias toward two children
        let count = [2, 2, 3][self.rng.random_range(0..3)];
        let parent_speed = parent.vel.length();
        let mut kids = Vec::with_capacity(count);
        for _ in 0..count {
            let variance = self
                .rng
                .random_range(-ASTEROID_CHILD_VARIANCE..ASTEROID_CHILD_VARIANCE);
            let radius =
                (parent.radius * (ASTEROID_SPLIT_FACTOR + variance)).max(ASTEROID_MIN_RADIUS);
            let angle = self.rng.random_range(0.0..TAU);
            // children trend faster than the parent
            let speed = (parent_speed + 0.5) * (1.0 + self.rng.random_range(-0.2..0.35));
            let id = self.next_entity_id();
            kids.push(Asteroid::new(
                id,
                parent.pos,
                radius,
                vec_from_angle(angle, speed),
            ));
        }
        kids
    }
}

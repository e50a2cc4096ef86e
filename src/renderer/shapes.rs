//! Wireframe entity shapes

use std::f32::consts::TAU;

use glam::Vec2;
use macroquad::color::Color;
use macroquad::math::Vec2 as MqVec2;
use macroquad::shapes::{draw_circle, draw_line, draw_triangle_lines};

use crate::sim::{Asteroid, Laser, Ship};
use crate::vec_from_angle;

/// Outline thickness for wireframe shapes
const LINE_W: f32 = 2.0;

fn mq(v: Vec2) -> MqVec2 {
    MqVec2::new(v.x, v.y)
}

/// Ship: a wireframe triangle with the nose along the facing angle.
/// Flickers on alternating 120 ms windows while invulnerable.
pub(super) fn draw_ship(ship: &Ship, now_ms: f64, color: Color) {
    if !ship.hittable(now_ms) && (now_ms / 120.0) as u64 % 2 == 1 {
        return;
    }
    let tip = ship.pos + vec_from_angle(ship.angle, ship.radius * 1.8);
    let left = ship.pos + vec_from_angle(ship.angle + 2.5, ship.radius);
    let right = ship.pos + vec_from_angle(ship.angle - 2.5, ship.radius);
    draw_triangle_lines(mq(tip), mq(left), mq(right), LINE_W, color);
}

/// Asteroid: a jagged outline polygon. The per-vertex jitter is derived
/// from the asteroid id so the silhouette is stable frame to frame.
pub(super) fn draw_asteroid(rock: &Asteroid, color: Color) {
    let spikes = ((rock.radius / 2.0) as usize).max(8);
    let mut prev = vertex(rock, spikes, spikes - 1);
    for i in 0..spikes {
        let next = vertex(rock, spikes, i);
        draw_line(prev.x, prev.y, next.x, next.y, LINE_W, color);
        prev = next;
    }
}

pub(super) fn draw_laser(laser: &Laser, color: Color) {
    draw_circle(laser.pos.x, laser.pos.y, laser.radius, color);
}

fn vertex(rock: &Asteroid, spikes: usize, i: usize) -> Vec2 {
    let angle = i as f32 / spikes as f32 * TAU;
    let jitter = 0.85 + hash01(rock.id, i as u32) * 0.3;
    rock.pos + vec_from_angle(angle, rock.radius * jitter)
}

/// Cheap golden-ratio hash to [0, 1)
fn hash01(id: u32, i: u32) -> f32 {
    let h = id
        .wrapping_mul(2654435761)
        .wrapping_add(i.wrapping_mul(7919));
    (h % 1000) as f32 / 1000.0
}

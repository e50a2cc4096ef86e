//! Circle-intersection tests for the destruction engine
//!
//! Every gameplay collision is circle vs circle; the predicate compares
//! squared distances to avoid the square root.

use glam::Vec2;

/// Whether two circles overlap (touching counts as a hit)
#[inline]
pub fn circles_intersect(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

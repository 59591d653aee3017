//! Collision handling for the sprite field
//!
//! Two cases exist: sprites bouncing off the viewport walls (per axis,
//! independently) and sprite pairs repelling each other along the line of
//! centers. The pair response deliberately discards prior velocities and
//! masses; both sprites leave at a fixed speed.

use glam::Vec2;

use crate::consts::{COLLISION_FORCE, COLLISION_RADIUS};

/// Resolve one axis of a sprite against the walls.
///
/// `limit` is `bound - sprite_size`, the largest legal coordinate. If the
/// post-integration coordinate left `[0, limit]`, the velocity component is
/// negated and the coordinate clamped back in. The clamp stays total when
/// `limit` is negative (viewport smaller than a sprite): the low bound wins.
pub fn wall_bounce(pos: f32, vel: f32, limit: f32) -> (f32, f32) {
    if pos <= 0.0 || pos >= limit {
        (pos.min(limit).max(0.0), -vel)
    } else {
        (pos, vel)
    }
}

/// Whether two sprite positions are within the collision radius
pub fn pair_collides(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < COLLISION_RADIUS
}

/// New velocities for a colliding pair.
///
/// Sprite `a` is pushed along the line of centers from `b` toward `a`,
/// sprite `b` the opposite way, both at `COLLISION_FORCE`.
pub fn pair_response(a: Vec2, b: Vec2) -> (Vec2, Vec2) {
    let d = a - b;
    let angle = d.y.atan2(d.x);
    let push = Vec2::new(angle.cos(), angle.sin()) * COLLISION_FORCE;
    (push, -push)
}

/// Marker spawn point for a colliding pair
pub fn pair_midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

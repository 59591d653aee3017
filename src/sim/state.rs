//! Sprite field state types
//!
//! Everything the render layer reads each frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A floating sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    /// Stable for the field's lifetime
    pub id: u32,
    /// Selects the visual asset the render layer draws for this sprite
    pub image_index: u32,
    /// Top-left corner in viewport pixels
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
}

/// Viewport dimensions constraining sprite motion
///
/// Supplied fresh by the host every frame; may change between frames
/// (window resize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Short-lived marker spawned at the midpoint of a colliding sprite pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMarker {
    /// Unique across the field's lifetime
    pub id: String,
    pub pos: Vec2,
    /// Host clock timestamp (ms) at detection time
    pub created_at: f64,
}

impl CollisionMarker {
    /// Marker age at `now`, never negative even if the host clock stepped
    /// backwards between frames
    pub fn age_ms(&self, now: f64) -> f64 {
        (now - self.created_at).max(0.0)
    }
}

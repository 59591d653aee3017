//! Floating sprite field
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Unit timestep (one `advance` per animation frame)
//! - Seeded RNG only
//! - Stable iteration order (by sprite index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod state;

pub use collision::{pair_collides, pair_midpoint, pair_response, wall_bounce};
pub use field::SpriteField;
pub use state::{Bounds, CollisionMarker, Sprite};

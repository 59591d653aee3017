//! Sprite field container and per-frame step
//!
//! The caller invokes [`SpriteField::advance`] once per render tick and
//! [`SpriteField::expire_markers`] on its own lower-frequency sweep; the
//! field holds no timers of its own.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{pair_collides, pair_midpoint, pair_response, wall_bounce};
use super::state::{Bounds, CollisionMarker, Sprite};
use crate::consts::{IMAGE_COUNT, MARKER_LIFETIME_MS, SPRITE_SIZE, START_SPEED};

/// The floating sprite field
///
/// Owns a fixed population of sprites and the active collision markers.
/// The render layer reads both collections; nothing else mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteField {
    sprites: Vec<Sprite>,
    markers: Vec<CollisionMarker>,
    bounds: Bounds,
    /// Feeds marker ids; never reused
    next_marker_seq: u64,
}

impl SpriteField {
    /// Create a field of `population` sprites inside `bounds`.
    ///
    /// Sprites get sequential ids, an image index cycling through the
    /// asset set, a uniformly random position within the bound minus the
    /// sprite footprint, and a uniformly random velocity per axis in
    /// `[-START_SPEED, START_SPEED]`.
    pub fn new(population: usize, bounds: Bounds, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let max_x = (bounds.width - SPRITE_SIZE).max(0.0);
        let max_y = (bounds.height - SPRITE_SIZE).max(0.0);

        let sprites = (0..population)
            .map(|i| Sprite {
                id: i as u32,
                image_index: i as u32 % IMAGE_COUNT,
                pos: Vec2::new(
                    rng.random_range(0.0..=max_x),
                    rng.random_range(0.0..=max_y),
                ),
                vel: Vec2::new(
                    rng.random_range(-START_SPEED..=START_SPEED),
                    rng.random_range(-START_SPEED..=START_SPEED),
                ),
            })
            .collect();

        Self {
            sprites,
            markers: Vec::new(),
            bounds,
            next_marker_seq: 0,
        }
    }

    /// Advance the field by one animation frame.
    ///
    /// Integrates every sprite, bounces them off the walls of `bounds`
    /// (each axis independently), then resolves pairwise collisions in
    /// index order. A sprite caught in several collisions this frame keeps
    /// the velocity of the last pair processed. Each colliding pair emits
    /// one marker at its midpoint, stamped with `now_ms`.
    pub fn advance(&mut self, bounds: Bounds, now_ms: f64) {
        self.bounds = bounds;
        let limit_x = bounds.width - SPRITE_SIZE;
        let limit_y = bounds.height - SPRITE_SIZE;

        for sprite in &mut self.sprites {
            sprite.pos += sprite.vel;
            let (x, vx) = wall_bounce(sprite.pos.x, sprite.vel.x, limit_x);
            let (y, vy) = wall_bounce(sprite.pos.y, sprite.vel.y, limit_y);
            sprite.pos = Vec2::new(x, y);
            sprite.vel = Vec2::new(vx, vy);
        }

        for i in 0..self.sprites.len() {
            for j in (i + 1)..self.sprites.len() {
                let (a, b) = (self.sprites[i].pos, self.sprites[j].pos);
                if !pair_collides(a, b) {
                    continue;
                }

                let (va, vb) = pair_response(a, b);
                self.sprites[i].vel = va;
                self.sprites[j].vel = vb;

                let id = format!("{}-{}-{}", self.next_marker_seq, i, j);
                self.next_marker_seq += 1;
                self.markers.push(CollisionMarker {
                    id,
                    pos: pair_midpoint(a, b),
                    created_at: now_ms,
                });
            }
        }
    }

    /// Drop every marker older than the lifetime constant.
    ///
    /// Runs on the host's sweep interval, independent of the frame step.
    pub fn expire_markers(&mut self, now_ms: f64) {
        self.markers
            .retain(|m| m.age_ms(now_ms) <= MARKER_LIFETIME_MS);
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn markers(&self) -> &[CollisionMarker] {
        &self.markers
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLLISION_FORCE, SPRITE_COUNT};
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_new_field_population_and_ids() {
        let field = SpriteField::new(SPRITE_COUNT, BOUNDS, 7);
        assert_eq!(field.sprites().len(), SPRITE_COUNT);
        for (i, sprite) in field.sprites().iter().enumerate() {
            assert_eq!(sprite.id, i as u32);
            assert_eq!(sprite.image_index, i as u32 % IMAGE_COUNT);
            assert!(sprite.pos.x >= 0.0 && sprite.pos.x <= BOUNDS.width - SPRITE_SIZE);
            assert!(sprite.pos.y >= 0.0 && sprite.pos.y <= BOUNDS.height - SPRITE_SIZE);
            assert!(sprite.vel.x.abs() <= START_SPEED);
            assert!(sprite.vel.y.abs() <= START_SPEED);
        }
    }

    #[test]
    fn test_population_invariant_across_advances() {
        let mut field = SpriteField::new(SPRITE_COUNT, BOUNDS, 42);
        for frame in 0..500 {
            field.advance(BOUNDS, frame as f64 * 16.0);
        }
        assert_eq!(field.sprites().len(), SPRITE_COUNT);
    }

    #[test]
    fn test_wall_crossing_flips_velocity_sign() {
        let mut field = SpriteField::new(1, BOUNDS, 0);
        // Park the sprite one step short of the right wall, heading for it
        let limit = BOUNDS.width - SPRITE_SIZE;
        field.sprites[0].pos = Vec2::new(limit - 0.3, 100.0);
        field.sprites[0].vel = Vec2::new(0.5, 0.0);

        field.advance(BOUNDS, 0.0);
        assert_eq!(field.sprites[0].pos.x, limit);
        assert_eq!(field.sprites[0].vel.x, -0.5);
    }

    #[test]
    fn test_both_axes_bounce_in_one_frame() {
        let mut field = SpriteField::new(1, BOUNDS, 0);
        field.sprites[0].pos = Vec2::new(0.2, 0.2);
        field.sprites[0].vel = Vec2::new(-0.5, -0.5);

        field.advance(BOUNDS, 0.0);
        assert_eq!(field.sprites[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(field.sprites[0].vel, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_collision_emits_marker_and_sets_speed() {
        let mut field = SpriteField::new(2, BOUNDS, 0);
        field.sprites[0].pos = Vec2::new(100.0, 100.0);
        field.sprites[0].vel = Vec2::ZERO;
        field.sprites[1].pos = Vec2::new(130.0, 100.0);
        field.sprites[1].vel = Vec2::ZERO;

        field.advance(BOUNDS, 2500.0);

        assert_eq!(field.markers().len(), 1);
        let marker = &field.markers()[0];
        assert_eq!(marker.pos, Vec2::new(115.0, 100.0));
        assert_eq!(marker.created_at, 2500.0);

        // Both sprites leave at exactly the collision force, pushed apart
        assert!((field.sprites[0].vel.length() - COLLISION_FORCE).abs() < 1e-4);
        assert!((field.sprites[1].vel.length() - COLLISION_FORCE).abs() < 1e-4);
        assert!(field.sprites[0].vel.x < 0.0);
        assert!(field.sprites[1].vel.x > 0.0);
    }

    #[test]
    fn test_shared_sprite_keeps_last_pair_velocity() {
        // Three sprites in a row, all within the radius of each other.
        // Pairs resolve as (0,1), (0,2), (1,2): sprite 1's velocity from
        // pair (0,1) is overwritten by pair (1,2).
        let mut field = SpriteField::new(3, BOUNDS, 0);
        field.sprites[0].pos = Vec2::new(100.0, 100.0);
        field.sprites[1].pos = Vec2::new(120.0, 100.0);
        field.sprites[2].pos = Vec2::new(140.0, 100.0);
        for sprite in &mut field.sprites {
            sprite.vel = Vec2::ZERO;
        }

        field.advance(BOUNDS, 0.0);

        assert_eq!(field.markers().len(), 3);
        // Pair (1,2) pushes sprite 1 toward negative x; the earlier pair
        // (0,1) would have pushed it toward positive x.
        assert!(field.sprites[1].vel.x < 0.0);
    }

    #[test]
    fn test_marker_ids_unique() {
        let mut field = SpriteField::new(3, BOUNDS, 0);
        for sprite in &mut field.sprites {
            sprite.vel = Vec2::ZERO;
        }
        field.sprites[0].pos = Vec2::new(100.0, 100.0);
        field.sprites[1].pos = Vec2::new(120.0, 100.0);
        field.sprites[2].pos = Vec2::new(140.0, 100.0);

        // Same trio collides every frame; ids must still never repeat
        field.advance(BOUNDS, 0.0);
        field.advance(BOUNDS, 16.0);

        let mut ids: Vec<&str> = field.markers().iter().map(|m| m.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_marker_expiry_boundary() {
        let mut field = SpriteField::new(2, BOUNDS, 0);
        field.sprites[0].pos = Vec2::new(100.0, 100.0);
        field.sprites[1].pos = Vec2::new(120.0, 100.0);
        field.sprites[0].vel = Vec2::ZERO;
        field.sprites[1].vel = Vec2::ZERO;
        field.advance(BOUNDS, 1000.0);
        assert_eq!(field.markers().len(), 1);

        // Exactly at the lifetime: kept
        field.expire_markers(2000.0);
        assert_eq!(field.markers().len(), 1);

        // Past it: dropped
        field.expire_markers(2000.1);
        assert!(field.markers().is_empty());
    }

    #[test]
    fn test_shrinking_viewport_pulls_sprites_back() {
        let mut field = SpriteField::new(SPRITE_COUNT, BOUNDS, 11);
        let small = Bounds::new(200.0, 200.0);
        // Two frames: the first clamps anything stranded outside, the
        // second must not push it back out
        field.advance(small, 0.0);
        field.advance(small, 16.0);
        for sprite in field.sprites() {
            assert!(sprite.pos.x >= 0.0 && sprite.pos.x <= small.width - SPRITE_SIZE);
            assert!(sprite.pos.y >= 0.0 && sprite.pos.y <= small.height - SPRITE_SIZE);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = SpriteField::new(SPRITE_COUNT, BOUNDS, 99);
        let mut b = SpriteField::new(SPRITE_COUNT, BOUNDS, 99);
        for frame in 0..200 {
            let now = frame as f64 * 16.0;
            a.advance(BOUNDS, now);
            b.advance(BOUNDS, now);
        }
        for (x, y) in a.sprites().iter().zip(b.sprites()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
        }
        assert_eq!(a.markers().len(), b.markers().len());
    }

    proptest! {
        #[test]
        fn prop_sprites_stay_in_bounds(
            seed in any::<u64>(),
            width in 100.0f32..2560.0,
            height in 100.0f32..1440.0,
            frames in 1usize..200,
        ) {
            let bounds = Bounds::new(width, height);
            let mut field = SpriteField::new(SPRITE_COUNT, bounds, seed);
            for frame in 0..frames {
                field.advance(bounds, frame as f64 * 16.0);
            }
            for sprite in field.sprites() {
                prop_assert!(sprite.pos.x >= 0.0);
                prop_assert!(sprite.pos.x <= bounds.width - SPRITE_SIZE);
                prop_assert!(sprite.pos.y >= 0.0);
                prop_assert!(sprite.pos.y <= bounds.height - SPRITE_SIZE);
            }
        }
    }
}

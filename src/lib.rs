//! Drift Countdown - an animated countdown landing page
//!
//! Core modules:
//! - `sim`: floating sprite field (motion, collisions, markers)
//! - `countdown`: multi-timezone countdown calculator
//! - `minigame`: tic-tac-toe board
//! - `player`: background music playback state
//! - `links`: sidebar navigation data
//! - `settings`: user preferences

pub mod countdown;
pub mod links;
pub mod minigame;
pub mod player;
pub mod settings;
pub mod sim;

pub use player::Playback;
pub use settings::Settings;

/// Page configuration constants
pub mod consts {
    /// Number of floating sprites in the field
    pub const SPRITE_COUNT: usize = 20;
    /// Sprite footprint in pixels (square)
    pub const SPRITE_SIZE: f32 = 50.0;
    /// Number of sprite image assets (`/images/0.png` .. `/images/20.png`)
    pub const IMAGE_COUNT: u32 = 21;
    /// Start velocity limit per axis, pixels/frame
    pub const START_SPEED: f32 = 0.75;
    /// Distance below which two sprites collide, pixels
    pub const COLLISION_RADIUS: f32 = 50.0;
    /// Speed given to both sprites of a colliding pair, pixels/frame
    pub const COLLISION_FORCE: f32 = 2.0;
    /// How long a collision marker stays visible, ms
    pub const MARKER_LIFETIME_MS: f64 = 1000.0;
    /// Period of the marker expiry sweep, ms
    pub const MARKER_SWEEP_MS: i32 = 100;
}

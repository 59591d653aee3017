//! Background music playback state
//!
//! The page starts in the playing state and attempts autoplay on load.
//! Browsers may refuse playback until a user gesture; the driver reports
//! that through [`Playback::autoplay_blocked`] so the displayed state
//! matches what is actually audible.

use serde::{Deserialize, Serialize};

/// Default music volume
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Play/pause flag plus volume for the background track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playback {
    playing: bool,
    volume: f32,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Self {
            playing: true,
            volume: DEFAULT_VOLUME,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Flip play/pause; returns the new state
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Volume is clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// The host refused the play request; fall back to showing paused
    pub fn autoplay_blocked(&mut self) {
        self.playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_playing_at_default_volume() {
        let playback = Playback::new();
        assert!(playback.is_playing());
        assert_eq!(playback.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn test_autoplay_blocked_reverts_to_paused() {
        let mut playback = Playback::new();
        playback.autoplay_blocked();
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut playback = Playback::new();
        assert!(!playback.toggle());
        assert!(playback.toggle());
        assert!(playback.is_playing());
    }

    #[test]
    fn test_volume_clamped() {
        let mut playback = Playback::new();
        playback.set_volume(1.7);
        assert_eq!(playback.volume(), 1.0);
        playback.set_volume(-0.3);
        assert_eq!(playback.volume(), 0.0);
        playback.set_volume(0.3);
        assert_eq!(playback.volume(), 0.3);
    }
}

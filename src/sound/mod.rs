//! Sound playback system for the tray timer.
//!
//! This module provides the audible half of an expiry alert:
//!
//! - A synthesized alarm tone (800 Hz sine)
//! - Optional system sound replacing the tone
//! - Non-blocking playback on a dedicated audio thread
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────┐
//! │ AlertCoordinator │──play─▶│   SoundPlayer    │
//! └──────────────────┘        └────────┬─────────┘
//!                                      │ mpsc
//!                                      ▼
//!                             ┌──────────────────┐
//!                             │  audio thread    │
//!                             │ (rodio stream)   │
//!                             └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use tray_timer::sound::{RodioSoundPlayer, SoundSource};
//!
//! # fn main() -> Result<(), tray_timer::sound::SoundError> {
//! let player = RodioSoundPlayer::new()?;
//! player.play(&SoundSource::alarm())?;
//! # Ok(())
//! # }
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{discover_system_sounds, find_system_sound, resolve_sound, SoundSource, ToneSpec};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer: Send + Sync {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.clear();
        }
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("Mock failure".to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(source.clone());
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

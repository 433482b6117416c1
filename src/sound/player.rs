//! Sound player implementation using rodio.
//!
//! `rodio::OutputStream` is not `Send`, so the player owns a dedicated audio
//! thread that holds the stream and plays whatever it is sent. The player
//! handle itself is `Send + Sync` and can be shared through `Arc`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, ToneSpec};

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking: `play` queues the sound on the audio thread and
/// returns immediately.
pub struct RodioSoundPlayer {
    /// Queue to the audio thread.
    request_tx: Sender<SoundSource>,
}

impl RodioSoundPlayer {
    /// Creates a new sound player and its audio thread.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (init_tx, init_rx) = mpsc::sync_channel(1);

        thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || audio_thread(request_rx, init_tx))
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        init_rx
            .recv()
            .map_err(|e| SoundError::StreamError(e.to_string()))??;

        debug!("Audio output stream initialized");

        Ok(Self { request_tx })
    }

    /// Plays a sound from the given source.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if the audio thread has stopped.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        self.request_tx
            .send(source.clone())
            .map_err(|_| SoundError::StreamError("audio thread stopped".to_string()))
    }

    /// The output stream is opened during construction, so a constructed
    /// player is always available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

fn audio_thread(
    requests: Receiver<SoundSource>,
    init_tx: mpsc::SyncSender<Result<(), SoundError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => {
            let _ = init_tx.send(Ok(()));
            pair
        }
        Err(e) => {
            let _ = init_tx.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            return;
        }
    };

    for source in requests {
        if let Err(e) = play_source(&handle, &source) {
            warn!("Sound playback failed: {}", e);
        }
    }
    debug!("Audio thread stopped");
}

fn play_source(handle: &OutputStreamHandle, source: &SoundSource) -> Result<(), SoundError> {
    match source {
        SoundSource::Tone(tone) => play_tone(handle, tone),
        SoundSource::System { name, path } => match play_file(handle, path) {
            Err(e) if e.should_fallback_to_tone() => {
                warn!("Failed to play '{}': {}, falling back to tone", name, e);
                play_tone(handle, &ToneSpec::alarm())
            }
            result => result,
        },
    }
}

fn play_tone(handle: &OutputStreamHandle, tone: &ToneSpec) -> Result<(), SoundError> {
    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
    sink.append(
        SineWave::new(tone.frequency_hz as f32)
            .take_duration(Duration::from_millis(tone.duration_ms))
            .amplify(tone.gain()),
    );
    // Keeps playing after the sink is dropped
    sink.detach();
    Ok(())
}

fn play_file(handle: &OutputStreamHandle, path: &Path) -> Result<(), SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    let decoder =
        Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))?;

    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
    sink.append(decoder);
    sink.detach();
    Ok(())
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}

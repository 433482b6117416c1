//! Sound source management.
//!
//! The alarm is a synthesized sine tone by default. A system sound can
//! replace it, looked up by name in the platform sound directories or given
//! as a file path.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// A synthesized sine tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneSpec {
    /// Frequency in Hz
    pub frequency_hz: u32,
    /// Length of one beep in milliseconds
    pub duration_ms: u64,
    /// Gain in percent (0-100)
    pub volume_percent: u8,
}

impl ToneSpec {
    /// The expiry beep: 800 Hz sine, 500 ms, 30% volume.
    #[must_use]
    pub const fn alarm() -> Self {
        Self {
            frequency_hz: 800,
            duration_ms: 500,
            volume_percent: 30,
        }
    }

    /// Gain as a linear factor.
    #[must_use]
    pub fn gain(&self) -> f32 {
        f32::from(self.volume_percent.min(100)) / 100.0
    }
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self::alarm()
    }
}

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A synthesized tone.
    Tone(ToneSpec),
    /// A sound file on disk.
    System {
        /// The name of the sound (e.g., "bell").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
}

impl SoundSource {
    /// The default expiry beep.
    #[must_use]
    pub fn alarm() -> Self {
        Self::Tone(ToneSpec::alarm())
    }

    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tone(_) => "tone",
            Self::System { name, .. } => name,
        }
    }

    /// Returns true if this is a file-based sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Returns true if this is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone(_))
    }

    /// Returns the file path if this is a system sound.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::System { path, .. } => Some(path),
            Self::Tone(_) => None,
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::alarm()
    }
}

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &[
    "/System/Library/Sounds",
    "/Library/Sounds",
    "/usr/share/sounds/freedesktop/stereo",
];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "flac", "ogg", "oga"];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Discovers available system sounds.
///
/// Returns an empty vector if no sound directory exists.
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in SYSTEM_SOUND_DIRS {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let file_path = entry.path();
            if !is_supported(&file_path) {
                continue;
            }
            if let Some(stem) = file_path.file_stem() {
                sounds.push(SoundSource::System {
                    name: stem.to_string_lossy().into_owned(),
                    path: file_path,
                });
            }
        }
    }

    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Finds a system sound by name (case-insensitive).
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name exists.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("системный звук '{}'", name)))
}

/// Resolves a `--sound` value: a path if it contains a separator, otherwise
/// a system sound name.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if the file or name does not exist.
pub fn resolve_sound(name_or_path: &str) -> Result<SoundSource, SoundError> {
    if !name_or_path.contains(std::path::MAIN_SEPARATOR) {
        return find_system_sound(name_or_path);
    }

    let path = PathBuf::from(name_or_path);
    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name_or_path.to_string());
    Ok(SoundSource::System { name, path })
}

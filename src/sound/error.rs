//! Sound system error types.
//!
//! Every error here is recoverable: the alert degrades to silent and the
//! countdown is never affected.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// Audio device is not available (e.g., no output configured).
    #[error("Аудиоустройство недоступно: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found.
    #[error("Звуковой файл не найден: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("Не удалось декодировать звуковой файл: {0}")]
    DecodeError(String),

    /// The audio output stream failed or its thread is gone.
    #[error("Ошибка аудиопотока: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("Ошибка воспроизведения: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if playback should fall back to the synthesized tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Подключите аудиоустройство",
            Self::FileNotFound(_) => "Будет использован встроенный сигнал",
            Self::DecodeError(_) => "Звуковой файл, возможно, поврежден",
            Self::StreamError(_) => "Проверьте настройки звука",
            Self::PlaybackError(_) => "Перезапустите приложение",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert!(err.to_string().contains("no device"));
        assert!(err.to_string().contains("Аудиоустройство недоступно"));

        let err = SoundError::FileNotFound("/path/to/bell.oga".to_string());
        assert!(err.to_string().contains("/path/to/bell.oga"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(SoundError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(SoundError::StreamError("x".into()).is_device_error());
        assert!(!SoundError::FileNotFound("x".into()).is_device_error());
        assert!(!SoundError::PlaybackError("x".into()).is_device_error());
    }

    #[test]
    fn test_should_fallback_to_tone() {
        assert!(SoundError::FileNotFound("x".into()).should_fallback_to_tone());
        assert!(SoundError::DecodeError("x".into()).should_fallback_to_tone());
        assert!(!SoundError::DeviceNotAvailable("x".into()).should_fallback_to_tone());
    }

    #[test]
    fn test_suggestion() {
        let err = SoundError::FileNotFound("x".into());
        assert!(err.suggestion().contains("встроенный"));

        let err = SoundError::StreamError("x".into());
        assert!(err.suggestion().contains("звука"));
    }
}

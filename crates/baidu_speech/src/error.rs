//! Speech client errors

use thiserror::Error;

/// Status codes reported by the speech service
pub mod status_code {
    /// Request accepted and processed
    pub const SUCCESS: i64 = 0;
    /// ASR: user authentication failed (token rejected)
    pub const ASR_AUTH_FAILED: i64 = 3302;
    /// TTS: token verification failed
    pub const TTS_AUTH_FAILED: i64 = 502;
}

/// Errors raised while talking to the speech service or storing its output
///
/// These never reach callers of [`crate::SpeechClient`]; the client folds
/// them into a [`crate::SpeechResponse`].
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech request timeout after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing synthesized audio failed
    #[error("Storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl SpeechError {
    /// Whether the error means no usable response came back from the service
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::InvalidResponse(_)
                | Self::Timeout(_)
                | Self::Configuration(_)
        )
    }
}

impl SpeechError {
    /// Classify a transport error; `timeout_ms` is the limit the request ran under
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Caller input rejected before any request is made
///
/// The `Display` text is the message carried by the failure envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Neither a local file nor a URL was supplied
    #[error("need at least one audio source")]
    MissingAudioSource,

    /// Local audio file does not exist or cannot be read
    #[error("invalid file path")]
    InvalidFilePath,

    /// Audio format outside pcm, wav, opus, speex, amr
    #[error("unsupported format")]
    UnsupportedFormat,

    /// Sample rate other than 8000 or 16000
    #[error("unsupported sample rate")]
    UnsupportedSampleRate,

    /// Language not accepted by the operation
    #[error("unsupported language")]
    UnsupportedLanguage,

    /// Storage directory missing or not a directory
    #[error("invalid storage path")]
    InvalidStoragePath,

    /// Nothing to synthesize
    #[error("missing text")]
    MissingText,

    /// Speed outside 0..=9
    #[error("invalid speed")]
    InvalidSpeed,

    /// Pitch outside 0..=9
    #[error("invalid pitch")]
    InvalidPitch,

    /// Volume outside 0..=15
    #[error("invalid volume")]
    InvalidVolume,

    /// Voice persona outside 0..=4
    #[error("invalid person")]
    InvalidPerson,
}

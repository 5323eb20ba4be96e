//! Caller-facing requests and their validation
//!
//! Requests hold values exactly as callers supply them. `validate` checks
//! them in a fixed order and stops at the first problem, turning the rest
//! into typed values and upstream options.

use std::path::{Path, PathBuf};

use crate::error::ValidationError;
use crate::ports::{AsrOptions, TtsOptions};
use crate::types::{AudioFormat, RecognitionLanguage, SampleRate, SynthesisLanguage};

/// Highest accepted speed
pub const MAX_SPEED: u8 = 9;
/// Highest accepted pitch
pub const MAX_PITCH: u8 = 9;
/// Highest accepted volume
pub const MAX_VOLUME: u8 = 15;
/// Highest accepted voice persona
pub const MAX_PERSON: u8 = 4;

/// Empty strings count as "not given"
fn given(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Speech recognition request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionRequest {
    /// Local audio file, preferred over `url`
    pub file_path: Option<PathBuf>,
    /// Remote audio URL
    pub url: Option<String>,
    /// Callback URL for remote audio
    pub callback: Option<String>,
    /// User identifier forwarded as `cuid`
    pub user_id: Option<String>,
    /// Audio format name
    pub format: String,
    /// Sample rate in Hz
    pub rate: u32,
    /// Language code
    pub language: String,
}

impl Default for RecognitionRequest {
    fn default() -> Self {
        Self {
            file_path: None,
            url: None,
            callback: None,
            user_id: None,
            format: AudioFormat::default().as_str().to_string(),
            rate: SampleRate::default().as_hz(),
            language: RecognitionLanguage::default().as_str().to_string(),
        }
    }
}

impl RecognitionRequest {
    /// Recognize a local audio file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Recognize audio the service downloads itself
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the remote audio URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the callback URL
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Set the user identifier
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the audio format name
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the sample rate
    #[must_use]
    pub const fn with_rate(mut self, rate: u32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the language code
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn local_file(&self) -> Option<&Path> {
        self.file_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Check the request and resolve typed values
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<ValidRecognition, ValidationError> {
        let file = self.local_file();
        let url = given(self.url.as_deref());

        let source = match (file, url) {
            (None, None) => return Err(ValidationError::MissingAudioSource),
            (Some(path), _) if !path.is_file() => return Err(ValidationError::InvalidFilePath),
            (Some(path), _) => AudioSource::File(path.to_path_buf()),
            (None, Some(url)) => AudioSource::Url(url.to_string()),
        };

        let format = self.format.parse::<AudioFormat>()?;
        let rate = SampleRate::try_from(self.rate)?;
        let language = self.language.parse::<RecognitionLanguage>()?;

        Ok(ValidRecognition {
            options: AsrOptions {
                language,
                url: match &source {
                    AudioSource::Url(url) => Some(url.clone()),
                    AudioSource::File(_) => None,
                },
                callback: given(self.callback.as_deref()).map(str::to_string),
                cuid: given(self.user_id.as_deref()).map(str::to_string),
            },
            source,
            format,
            rate,
        })
    }
}

/// Where recognition audio comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Read from the local filesystem and uploaded
    File(PathBuf),
    /// Downloaded by the service
    Url(String),
}

/// Recognition request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecognition {
    /// Audio origin
    pub source: AudioSource,
    /// Audio format
    pub format: AudioFormat,
    /// Sample rate
    pub rate: SampleRate,
    /// Upstream options
    pub options: AsrOptions,
}

/// Speech synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Existing directory that receives the audio file
    pub storage_path: PathBuf,
    /// Text to speak
    pub text: String,
    /// User identifier forwarded as `cuid`
    pub user_id: Option<String>,
    /// Language code
    pub language: String,
    /// Speed, 0..=9
    pub speed: u8,
    /// Pitch, 0..=9
    pub pitch: u8,
    /// Volume, 0..=15
    pub volume: u8,
    /// Voice persona: 0 female, 1 male, 3 and 4 emotional voices
    pub person: u8,
}

impl SynthesisRequest {
    /// Synthesize `text` into a file below `storage_path`, with default voice settings
    pub fn new(storage_path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let defaults = TtsOptions::default();
        Self {
            storage_path: storage_path.into(),
            text: text.into(),
            user_id: None,
            language: SynthesisLanguage::default().as_str().to_string(),
            speed: defaults.speed,
            pitch: defaults.pitch,
            volume: defaults.volume,
            person: defaults.person,
        }
    }

    /// Set the user identifier
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the language code
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the speed
    #[must_use]
    pub const fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    /// Set the pitch
    #[must_use]
    pub const fn with_pitch(mut self, pitch: u8) -> Self {
        self.pitch = pitch;
        self
    }

    /// Set the volume
    #[must_use]
    pub const fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    /// Set the voice persona
    #[must_use]
    pub const fn with_person(mut self, person: u8) -> Self {
        self.person = person;
        self
    }

    /// Check the request and resolve typed values
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<ValidSynthesis, ValidationError> {
        if self.storage_path.as_os_str().is_empty() || !self.storage_path.is_dir() {
            return Err(ValidationError::InvalidStoragePath);
        }
        if self.text.is_empty() {
            return Err(ValidationError::MissingText);
        }
        if self.speed > MAX_SPEED {
            return Err(ValidationError::InvalidSpeed);
        }
        if self.pitch > MAX_PITCH {
            return Err(ValidationError::InvalidPitch);
        }
        if self.volume > MAX_VOLUME {
            return Err(ValidationError::InvalidVolume);
        }
        if self.person > MAX_PERSON {
            return Err(ValidationError::InvalidPerson);
        }
        let language = self.language.parse::<SynthesisLanguage>()?;

        Ok(ValidSynthesis {
            storage_root: self.storage_path.clone(),
            text: self.text.clone(),
            language,
            options: TtsOptions {
                speed: self.speed,
                pitch: self.pitch,
                volume: self.volume,
                person: self.person,
                cuid: given(self.user_id.as_deref()).map(str::to_string),
            },
        })
    }
}

/// Synthesis request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSynthesis {
    /// Root of the date-partitioned output tree
    pub storage_root: PathBuf,
    /// Text to speak
    pub text: String,
    /// Language
    pub language: SynthesisLanguage,
    /// Upstream options
    pub options: TtsOptions,
}

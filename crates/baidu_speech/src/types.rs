//! Types for speech requests
//!
//! Typed forms of the audio format, sample rate and language values that
//! callers pass in as plain strings and integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Audio formats accepted for recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Uncompressed PCM
    Pcm,
    /// WAV container
    #[default]
    Wav,
    /// Opus
    Opus,
    /// Speex
    Speex,
    /// AMR
    Amr,
}

impl AudioFormat {
    /// All accepted formats
    pub const ALL: [Self; 5] = [Self::Pcm, Self::Wav, Self::Opus, Self::Speex, Self::Amr];

    /// Wire name of the format
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pcm => "pcm",
            Self::Wav => "wav",
            Self::Opus => "opus",
            Self::Speex => "speex",
            Self::Amr => "amr",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or(ValidationError::UnsupportedFormat)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample rates accepted for recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleRate {
    /// 8 kHz
    Hz8000,
    /// 16 kHz
    #[default]
    Hz16000,
}

impl SampleRate {
    /// Rate in Hz
    #[must_use]
    pub const fn as_hz(&self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = ValidationError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        match hz {
            8000 => Ok(Self::Hz8000),
            16000 => Ok(Self::Hz16000),
            _ => Err(ValidationError::UnsupportedSampleRate),
        }
    }
}

/// Languages accepted for recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionLanguage {
    /// Mandarin
    #[default]
    Zh,
    /// Cantonese
    Ct,
    /// English
    En,
}

impl RecognitionLanguage {
    /// Wire code of the language
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::Ct => "ct",
            Self::En => "en",
        }
    }
}

impl FromStr for RecognitionLanguage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Self::Zh),
            "ct" => Ok(Self::Ct),
            "en" => Ok(Self::En),
            _ => Err(ValidationError::UnsupportedLanguage),
        }
    }
}

/// Languages accepted for synthesis
///
/// The service only synthesizes Mandarin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisLanguage {
    /// Mandarin (mixed Chinese/English text)
    #[default]
    Zh,
}

impl SynthesisLanguage {
    /// Wire code of the language
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
        }
    }
}

impl FromStr for SynthesisLanguage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Self::Zh),
            _ => Err(ValidationError::UnsupportedLanguage),
        }
    }
}

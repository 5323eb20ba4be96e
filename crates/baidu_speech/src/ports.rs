//! Port definitions for the upstream speech service
//!
//! [`crate::SpeechClient`] only shapes requests and normalizes answers; the
//! actual recognition and synthesis happen behind [`SpeechService`].

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{SpeechError, status_code};
use crate::types::{AudioFormat, RecognitionLanguage, SampleRate, SynthesisLanguage};

/// Optional parameters of a recognition call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AsrOptions {
    /// Spoken language
    #[serde(rename = "lan")]
    pub language: RecognitionLanguage,

    /// Remote audio location, only set when no local audio is sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Where the service posts results for remote audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,

    /// Caller-supplied user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuid: Option<String>,
}

/// Raw answer of a recognition call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsrResponse {
    /// Service status, zero on success
    ///
    /// Required: a body without it is not a recognition answer.
    pub err_no: i64,

    /// Service status message
    #[serde(default)]
    pub err_msg: String,

    /// Recognized text alternatives
    #[serde(default)]
    pub result: Vec<String>,

    /// Request serial number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sn: Option<String>,

    /// Corpus number assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_no: Option<String>,
}

impl AsrResponse {
    /// Rejected answer with the given status
    pub fn rejected(err_no: i64, err_msg: impl Into<String>) -> Self {
        Self {
            err_no,
            err_msg: err_msg.into(),
            ..Default::default()
        }
    }

    /// Whether the service accepted the request
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.err_no == status_code::SUCCESS
    }
}

/// Optional parameters of a synthesis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TtsOptions {
    /// Speed, 0..=9
    #[serde(rename = "spd")]
    pub speed: u8,

    /// Pitch, 0..=9
    #[serde(rename = "pit")]
    pub pitch: u8,

    /// Volume, 0..=15
    #[serde(rename = "vol")]
    pub volume: u8,

    /// Voice persona, 0..=4
    #[serde(rename = "per")]
    pub person: u8,

    /// Caller-supplied user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuid: Option<String>,
}

impl Default for TtsOptions {
    fn default() -> Self {
        Self {
            speed: 5,
            pitch: 5,
            volume: 5,
            person: 0,
            cuid: None,
        }
    }
}

/// Answer of a synthesis call: audio on success, a status otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// MP3 audio
    Audio(Bytes),
    /// Request rejected by the service
    ServiceError {
        /// Service status code
        code: i64,
        /// Service status message
        message: String,
    },
}

/// Port for the remote speech service
///
/// `Err` means no usable answer came back (connection, timeout, garbage
/// body). A rejection by the service is an `Ok` value carrying its status.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Recognize speech
    ///
    /// `audio` is `None` when the service should fetch `options.url` itself.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if no response could be obtained.
    async fn recognize(
        &self,
        audio: Option<Vec<u8>>,
        format: AudioFormat,
        rate: SampleRate,
        options: &AsrOptions,
    ) -> Result<AsrResponse, SpeechError>;

    /// Synthesize MP3 speech from text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if no response could be obtained.
    async fn synthesize(
        &self,
        text: &str,
        language: SynthesisLanguage,
        options: &TtsOptions,
    ) -> Result<SynthesisOutcome, SpeechError>;
}

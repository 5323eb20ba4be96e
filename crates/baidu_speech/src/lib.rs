//! Baidu Speech - recognition and synthesis client
//!
//! Wraps the Baidu speech REST service behind a small, forgiving API:
//! - `SpeechClient::recognize` - audio file or URL to text (ASR)
//! - `SpeechClient::synthesize` - text to an MP3 file on disk (TTS)
//!
//! Both operations validate their input before any request is made and
//! always answer with the same [`SpeechResponse`] envelope
//! (`{success, message, data?}`), whatever went wrong.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the upstream service trait (port)
//! - `providers` module contains the Baidu REST adapter
//! - `client` shapes requests and normalizes answers
//!
//! # Example
//!
//! ```ignore
//! use baidu_speech::{RecognitionRequest, SpeechClient, SynthesisRequest};
//!
//! let client = SpeechClient::new("app-id", "api-key", "secret-key");
//!
//! // Recognize a local recording
//! let response = client
//!     .recognize(&RecognitionRequest::from_file("hello.wav").with_rate(8000))
//!     .await;
//! println!("{:?}", response.transcript());
//!
//! // Synthesize into ./audio/<YYYY>/<MM>/<DD>/<uuid>.mp3
//! let response = client
//!     .synthesize(&SynthesisRequest::new("./audio", "你好").with_person(1))
//!     .await;
//! println!("{:?}", response.audio_path());
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod request;
pub mod response;
pub mod storage;
pub mod types;

pub use client::SpeechClient;
pub use config::{Credentials, SpeechConfig};
pub use error::{SpeechError, ValidationError};
pub use ports::{AsrOptions, AsrResponse, SpeechService, SynthesisOutcome, TtsOptions};
pub use providers::baidu::BaiduSpeechService;
pub use request::{RecognitionRequest, SynthesisRequest};
pub use response::{ResponseData, ServiceErrorData, SpeechResponse};
pub use storage::AudioStore;
pub use types::{AudioFormat, RecognitionLanguage, SampleRate, SynthesisLanguage};

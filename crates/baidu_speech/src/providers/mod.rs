//! Speech service implementations
//!
//! Contains concrete implementations of the `SpeechService` port.

pub mod baidu;

pub use baidu::BaiduSpeechService;

//! Uniform result envelope returned by both operations

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// No usable answer from the service
pub const NETWORK_TIMEOUT: &str = "network timeout";
/// Recognition accepted by the service
pub const RECOGNITION_SUCCEEDED: &str = "recognition succeeded";
/// Recognition rejected by the service
pub const RECOGNITION_FAILED: &str = "recognition failed";
/// Audio synthesized and stored
pub const SYNTHESIS_SUCCEEDED: &str = "synthesis succeeded";
/// Synthesis rejected by the service
pub const SYNTHESIS_FAILED: &str = "synthesis failed";
/// Audio synthesized but could not be written
pub const STORAGE_FAILED: &str = "failed to store synthesized audio";

/// Status reported by the service for a rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceErrorData {
    /// Service status code
    pub error_code: i64,
    /// Service status message
    pub error_message: String,
}

/// Payload of the envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Recognized text alternatives
    Transcript(Vec<String>),
    /// Absolute path of the synthesized audio file
    AudioFile(PathBuf),
    /// Why the service rejected the request
    ServiceError(ServiceErrorData),
}

/// `{success, message, data?}` envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable outcome
    pub message: String,
    /// Operation payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl SpeechResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: None,
        }
    }

    /// Default failure when nothing usable came back
    #[must_use]
    pub fn network_timeout() -> Self {
        Self::failure(NETWORK_TIMEOUT)
    }

    /// Input rejected before any request
    #[must_use]
    pub fn invalid(error: ValidationError) -> Self {
        Self::failure(&error.to_string())
    }

    /// Synthesized audio could not be written
    #[must_use]
    pub fn storage_failed() -> Self {
        Self::failure(STORAGE_FAILED)
    }

    /// Request rejected by the service
    pub fn service_error(message: &str, code: i64, service_message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            data: Some(ResponseData::ServiceError(ServiceErrorData {
                error_code: code,
                error_message: service_message.into(),
            })),
        }
    }

    /// Successful recognition
    #[must_use]
    pub fn recognized(result: Vec<String>) -> Self {
        Self {
            success: true,
            message: RECOGNITION_SUCCEEDED.to_string(),
            data: Some(ResponseData::Transcript(result)),
        }
    }

    /// Successful synthesis
    #[must_use]
    pub fn synthesized(path: PathBuf) -> Self {
        Self {
            success: true,
            message: SYNTHESIS_SUCCEEDED.to_string(),
            data: Some(ResponseData::AudioFile(path)),
        }
    }

    /// Recognized text, if this is a successful recognition
    #[must_use]
    pub fn transcript(&self) -> Option<&[String]> {
        match &self.data {
            Some(ResponseData::Transcript(text)) => Some(text),
            _ => None,
        }
    }

    /// Written audio file, if this is a successful synthesis
    #[must_use]
    pub fn audio_path(&self) -> Option<&Path> {
        match &self.data {
            Some(ResponseData::AudioFile(path)) => Some(path),
            _ => None,
        }
    }

    /// Service status, if the service rejected the request
    #[must_use]
    pub fn service_error_data(&self) -> Option<&ServiceErrorData> {
        match &self.data {
            Some(ResponseData::ServiceError(data)) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn network_timeout_has_no_data() {
        let response = SpeechResponse::network_timeout();

        assert!(!response.success);
        assert_eq!(response.message, "network timeout");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": false, "message": "network timeout" })
        );
    }

    #[test]
    fn validation_failure_uses_error_text() {
        let response = SpeechResponse::invalid(ValidationError::UnsupportedSampleRate);

        assert!(!response.success);
        assert_eq!(response.message, "unsupported sample rate");
        assert!(response.data.is_none());
    }

    #[test]
    fn service_error_serializes_camel_case() {
        let response = SpeechResponse::service_error(RECOGNITION_FAILED, 3301, "speech quality error");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "message": "recognition failed",
                "data": { "errorCode": 3301, "errorMessage": "speech quality error" }
            })
        );
        assert_eq!(response.service_error_data().unwrap().error_code, 3301);
    }

    #[test]
    fn recognized_carries_alternatives() {
        let response = SpeechResponse::recognized(vec!["你好".to_string()]);

        assert!(response.success);
        assert_eq!(response.transcript(), Some(&["你好".to_string()][..]));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": true, "message": "recognition succeeded", "data": ["你好"] })
        );
    }

    #[test]
    fn synthesized_carries_path() {
        let response = SpeechResponse::synthesized(PathBuf::from("/srv/audio/2024/01/02/a.mp3"));

        assert!(response.success);
        assert_eq!(
            response.audio_path(),
            Some(Path::new("/srv/audio/2024/01/02/a.mp3"))
        );
        assert!(response.transcript().is_none());
    }

    #[test]
    fn envelope_deserializes_each_payload() {
        let transcript: SpeechResponse =
            serde_json::from_value(json!({ "success": true, "message": "ok", "data": ["a", "b"] }))
                .unwrap();
        assert_eq!(transcript.transcript().map(<[String]>::len), Some(2));

        let file: SpeechResponse =
            serde_json::from_value(json!({ "success": true, "message": "ok", "data": "/x.mp3" }))
                .unwrap();
        assert_eq!(file.audio_path(), Some(Path::new("/x.mp3")));

        let error: SpeechResponse = serde_json::from_value(json!({
            "success": false,
            "message": "synthesis failed",
            "data": { "errorCode": 501, "errorMessage": "bad params" }
        }))
        .unwrap();
        assert_eq!(error.service_error_data().unwrap().error_message, "bad params");
    }
}

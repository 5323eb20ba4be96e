//! Speech client
//!
//! Validates caller input, hands it to a [`SpeechService`] and folds every
//! outcome, including transport and storage failures, into a
//! [`SpeechResponse`]. Nothing here returns `Err` or panics on bad input.

use tracing::{debug, error, instrument, warn};

use crate::config::{Credentials, SpeechConfig};
use crate::error::{SpeechError, ValidationError};
use crate::ports::{SpeechService, SynthesisOutcome};
use crate::providers::BaiduSpeechService;
use crate::request::{AudioSource, RecognitionRequest, SynthesisRequest};
use crate::response::{RECOGNITION_FAILED, SYNTHESIS_FAILED, SpeechResponse};
use crate::storage::AudioStore;

/// Speech recognition and synthesis client
///
/// Stateless apart from the service it wraps; share it freely between tasks.
#[derive(Debug, Clone)]
pub struct SpeechClient<S = BaiduSpeechService> {
    service: S,
}

impl SpeechClient<BaiduSpeechService> {
    /// Client for the public Baidu endpoints
    ///
    /// Performs no I/O; bad credentials surface on the first call.
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self::with_service(BaiduSpeechService::with_defaults(Credentials::new(
            app_id, api_key, secret_key,
        )))
    }

    /// Client with custom endpoints or timeouts
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn with_config(credentials: Credentials, config: SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self::with_service(BaiduSpeechService::new(
            credentials,
            config,
        )?))
    }
}

impl<S: SpeechService> SpeechClient<S> {
    /// Client over any speech service implementation
    pub const fn with_service(service: S) -> Self {
        Self { service }
    }

    /// Underlying service
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Recognize speech from a local file or a URL
    ///
    /// A local file wins over a URL; the URL is then not sent at all.
    #[instrument(
        skip(self, request),
        fields(format = %request.format, rate = request.rate, language = %request.language)
    )]
    pub async fn recognize(&self, request: &RecognitionRequest) -> SpeechResponse {
        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(e) => {
                debug!(reason = %e, "Recognition request rejected");
                return SpeechResponse::invalid(e);
            },
        };

        let audio = match &valid.source {
            AudioSource::File(path) => match tokio::fs::read(path).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read audio file");
                    return SpeechResponse::invalid(ValidationError::InvalidFilePath);
                },
            },
            AudioSource::Url(_) => None,
        };

        match self
            .service
            .recognize(audio, valid.format, valid.rate, &valid.options)
            .await
        {
            Ok(answer) if answer.is_success() => SpeechResponse::recognized(answer.result),
            Ok(answer) => {
                debug!(err_no = answer.err_no, err_msg = %answer.err_msg, "Recognition rejected by service");
                SpeechResponse::service_error(RECOGNITION_FAILED, answer.err_no, answer.err_msg)
            },
            Err(e) => {
                warn!(error = %e, "Recognition request failed");
                SpeechResponse::network_timeout()
            },
        }
    }

    /// Synthesize `request.text` into `<storage>/<YYYY>/<MM>/<DD>/<uuid>.mp3`
    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    pub async fn synthesize(&self, request: &SynthesisRequest) -> SpeechResponse {
        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(e) => {
                debug!(reason = %e, "Synthesis request rejected");
                return SpeechResponse::invalid(e);
            },
        };

        match self
            .service
            .synthesize(&valid.text, valid.language, &valid.options)
            .await
        {
            Ok(SynthesisOutcome::Audio(audio)) => {
                match AudioStore::new(&valid.storage_root).store(&audio).await {
                    Ok(path) => SpeechResponse::synthesized(path),
                    Err(e) => {
                        error!(error = %e, "Failed to store synthesized audio");
                        SpeechResponse::storage_failed()
                    },
                }
            },
            Ok(SynthesisOutcome::ServiceError { code, message }) => {
                debug!(code, message = %message, "Synthesis rejected by service");
                SpeechResponse::service_error(SYNTHESIS_FAILED, code, message)
            },
            Err(e) => {
                warn!(error = %e, "Synthesis request failed");
                SpeechResponse::network_timeout()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::ports::{AsrOptions, AsrResponse, TtsOptions};
    use crate::types::{AudioFormat, SampleRate, SynthesisLanguage};

    /// What the mock hands back
    enum Reply {
        Asr(AsrResponse),
        Tts(SynthesisOutcome),
        Unreachable,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Recognize {
            audio: Option<Vec<u8>>,
            format: AudioFormat,
            rate: SampleRate,
            options: AsrOptions,
        },
        Synthesize {
            text: String,
            options: TtsOptions,
        },
    }

    struct MockService {
        reply: Reply,
        calls: Mutex<Vec<Call>>,
    }

    impl MockService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechService for MockService {
        async fn recognize(
            &self,
            audio: Option<Vec<u8>>,
            format: AudioFormat,
            rate: SampleRate,
            options: &AsrOptions,
        ) -> Result<AsrResponse, SpeechError> {
            self.calls.lock().unwrap().push(Call::Recognize {
                audio,
                format,
                rate,
                options: options.clone(),
            });
            match &self.reply {
                Reply::Asr(answer) => Ok(answer.clone()),
                Reply::Unreachable => Err(SpeechError::ConnectionFailed("refused".into())),
                Reply::Tts(_) => panic!("unexpected recognize call"),
            }
        }

        async fn synthesize(
            &self,
            text: &str,
            _language: SynthesisLanguage,
            options: &TtsOptions,
        ) -> Result<SynthesisOutcome, SpeechError> {
            self.calls.lock().unwrap().push(Call::Synthesize {
                text: text.to_string(),
                options: options.clone(),
            });
            match &self.reply {
                Reply::Tts(outcome) => Ok(outcome.clone()),
                Reply::Unreachable => Err(SpeechError::Timeout(30000)),
                Reply::Asr(_) => panic!("unexpected synthesize call"),
            }
        }
    }

    fn client(reply: Reply) -> SpeechClient<MockService> {
        SpeechClient::with_service(MockService::new(reply))
    }

    fn recognized(text: &str) -> Reply {
        Reply::Asr(AsrResponse {
            err_msg: "success.".to_string(),
            result: vec![text.to_string()],
            ..Default::default()
        })
    }

    mod recognize {
        use std::io::Write;

        use super::*;

        #[tokio::test]
        async fn invalid_input_makes_no_call() {
            let client = client(recognized("unused"));

            let cases = [
                (RecognitionRequest::default(), "need at least one audio source"),
                (
                    RecognitionRequest::from_file("/no/such/file.wav"),
                    "invalid file path",
                ),
                (
                    RecognitionRequest::from_url("https://example.com/a").with_format("mp3"),
                    "unsupported format",
                ),
                (
                    RecognitionRequest::from_url("https://example.com/a").with_rate(22050),
                    "unsupported sample rate",
                ),
                (
                    RecognitionRequest::from_url("https://example.com/a").with_language("jp"),
                    "unsupported language",
                ),
            ];

            for (request, message) in cases {
                let response = client.recognize(&request).await;
                assert!(!response.success);
                assert_eq!(response.message, message);
                assert!(response.data.is_none());
            }
            assert!(client.service().calls().is_empty());
        }

        #[tokio::test]
        async fn local_file_bytes_are_sent_and_url_dropped() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(b"RIFF-fake-wav").unwrap();
            let client = client(recognized("北京科技馆"));

            let request = RecognitionRequest::from_file(file.path())
                .with_url("https://example.com/ignored.wav")
                .with_user_id("user-1");
            let response = client.recognize(&request).await;

            assert!(response.success);
            assert_eq!(response.message, "recognition succeeded");
            assert_eq!(response.transcript(), Some(&["北京科技馆".to_string()][..]));
            assert_eq!(
                client.service().calls(),
                vec![Call::Recognize {
                    audio: Some(b"RIFF-fake-wav".to_vec()),
                    format: AudioFormat::Wav,
                    rate: SampleRate::Hz16000,
                    options: AsrOptions {
                        cuid: Some("user-1".to_string()),
                        ..Default::default()
                    },
                }]
            );
        }

        #[tokio::test]
        async fn url_only_sends_no_audio() {
            let client = client(recognized("hi"));

            let request = RecognitionRequest::from_url("https://example.com/a.opus")
                .with_format("opus")
                .with_callback("https://example.com/cb");
            let response = client.recognize(&request).await;

            assert!(response.success);
            let calls = client.service().calls();
            let Call::Recognize { audio, options, .. } = &calls[0] else {
                panic!("expected recognize call");
            };
            assert!(audio.is_none());
            assert_eq!(options.url.as_deref(), Some("https://example.com/a.opus"));
            assert_eq!(options.callback.as_deref(), Some("https://example.com/cb"));
            assert!(options.cuid.is_none());
        }

        #[tokio::test]
        async fn service_rejection_carries_code_and_message() {
            let client = client(Reply::Asr(AsrResponse::rejected(3301, "speech quality error.")));

            let response = client
                .recognize(&RecognitionRequest::from_url("https://example.com/a"))
                .await;

            assert!(!response.success);
            assert_eq!(response.message, "recognition failed");
            let data = response.service_error_data().unwrap();
            assert_eq!(data.error_code, 3301);
            assert_eq!(data.error_message, "speech quality error.");
        }

        #[tokio::test]
        async fn transport_failure_is_network_timeout() {
            let client = client(Reply::Unreachable);

            let response = client
                .recognize(&RecognitionRequest::from_url("https://example.com/a"))
                .await;

            assert_eq!(response, SpeechResponse::network_timeout());
        }
    }

    mod synthesize {
        use super::*;

        fn audio() -> Reply {
            Reply::Tts(SynthesisOutcome::Audio(Bytes::from_static(b"ID3-fake-mp3")))
        }

        #[tokio::test]
        async fn invalid_input_makes_no_call() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(audio());

            let cases = [
                (SynthesisRequest::new("", "你好"), "invalid storage path"),
                (
                    SynthesisRequest::new(dir.path().join("missing"), "你好"),
                    "invalid storage path",
                ),
                (SynthesisRequest::new(dir.path(), ""), "missing text"),
                (SynthesisRequest::new(dir.path(), "你好").with_speed(10), "invalid speed"),
                (SynthesisRequest::new(dir.path(), "你好").with_pitch(10), "invalid pitch"),
                (SynthesisRequest::new(dir.path(), "你好").with_volume(16), "invalid volume"),
                (SynthesisRequest::new(dir.path(), "你好").with_person(5), "invalid person"),
                (
                    SynthesisRequest::new(dir.path(), "你好").with_language("en"),
                    "unsupported language",
                ),
            ];

            for (request, message) in cases {
                let response = client.synthesize(&request).await;
                assert!(!response.success);
                assert_eq!(response.message, message);
                assert!(response.data.is_none());
            }
            assert!(client.service().calls().is_empty());
        }

        #[tokio::test]
        async fn audio_is_written_to_dated_file() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(audio());
            let before = chrono::Local::now().date_naive();

            let response = client
                .synthesize(&SynthesisRequest::new(dir.path(), "你好"))
                .await;

            let after = chrono::Local::now().date_naive();
            assert!(response.success);
            assert_eq!(response.message, "synthesis succeeded");
            let path = response.audio_path().unwrap();
            assert_eq!(std::fs::read(path).unwrap(), b"ID3-fake-mp3");

            let root = std::fs::canonicalize(dir.path()).unwrap();
            let store = AudioStore::new(root);
            assert!(
                path.parent() == Some(store.partition_dir(before).as_path())
                    || path.parent() == Some(store.partition_dir(after).as_path())
            );
        }

        #[tokio::test]
        async fn user_id_is_forwarded_as_cuid() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(audio());

            client
                .synthesize(&SynthesisRequest::new(dir.path(), "你好").with_user_id("user-9"))
                .await;
            client
                .synthesize(&SynthesisRequest::new(dir.path(), "你好"))
                .await;

            let cuids: Vec<Option<String>> = client
                .service()
                .calls()
                .into_iter()
                .map(|call| match call {
                    Call::Synthesize { options, .. } => options.cuid,
                    Call::Recognize { .. } => panic!("unexpected recognize call"),
                })
                .collect();
            assert_eq!(cuids, vec![Some("user-9".to_string()), None]);
        }

        #[tokio::test]
        async fn service_error_writes_nothing() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(Reply::Tts(SynthesisOutcome::ServiceError {
                code: 501,
                message: "input param is invalid".to_string(),
            }));

            let response = client
                .synthesize(&SynthesisRequest::new(dir.path(), "你好"))
                .await;

            assert!(!response.success);
            assert_eq!(response.message, "synthesis failed");
            let data = response.service_error_data().unwrap();
            assert_eq!(data.error_code, 501);
            assert_eq!(data.error_message, "input param is invalid");
            assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        }

        #[tokio::test]
        async fn transport_failure_is_network_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(Reply::Unreachable);

            let response = client
                .synthesize(&SynthesisRequest::new(dir.path(), "你好"))
                .await;

            assert_eq!(response, SpeechResponse::network_timeout());
        }

        #[tokio::test]
        async fn forwarded_voice_settings() {
            let dir = tempfile::tempdir().unwrap();
            let client = client(audio());

            client
                .synthesize(
                    &SynthesisRequest::new(dir.path(), "度逍遥")
                        .with_speed(2)
                        .with_pitch(7)
                        .with_volume(12)
                        .with_person(3),
                )
                .await;

            assert_eq!(
                client.service().calls(),
                vec![Call::Synthesize {
                    text: "度逍遥".to_string(),
                    options: TtsOptions {
                        speed: 2,
                        pitch: 7,
                        volume: 12,
                        person: 3,
                        cuid: None,
                    },
                }]
            );
        }
    }

    #[test]
    fn new_performs_no_validation() {
        let client = SpeechClient::new("", "", "");
        assert_eq!(client.service().app_id(), "");
    }

    #[test]
    fn with_config_rejects_bad_config() {
        let result = SpeechClient::with_config(
            Credentials::new("1", "a", "s"),
            SpeechConfig {
                timeout_ms: 0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(SpeechError::Configuration(_))));
    }
}

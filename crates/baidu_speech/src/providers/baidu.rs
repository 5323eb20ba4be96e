//! Baidu speech service adapter
//!
//! Implements [`SpeechService`] against the Baidu AIP speech REST endpoints.
//! Every call builds its own HTTP client and exchanges the API key/secret
//! key pair for an access token before the actual request.
//!
//! # Endpoints
//!
//! - token: `POST {token_url}?grant_type=client_credentials&client_id=..&client_secret=..`
//! - recognition: `POST {asr_url}` with a JSON body, audio base64 encoded
//! - synthesis: `POST {tts_url}` with a form body, answers `audio/*` or JSON

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::{Credentials, SpeechConfig};
use crate::error::{SpeechError, status_code};
use crate::ports::{AsrOptions, AsrResponse, SpeechService, SynthesisOutcome, TtsOptions};
use crate::types::{AudioFormat, SampleRate, SynthesisLanguage};

/// Mono audio only
const ASR_CHANNELS: u8 = 1;
/// Client type expected by the synthesis endpoint (web)
const TTS_CLIENT_TYPE: u8 = 1;
/// Synthesis audio encoding: mp3
const TTS_ENCODING_MP3: u8 = 3;

/// Speech service backed by the Baidu REST API
#[derive(Debug, Clone)]
pub struct BaiduSpeechService {
    credentials: Credentials,
    config: SpeechConfig,
}

impl BaiduSpeechService {
    /// Create a service with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(credentials: Credentials, config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self {
            credentials,
            config,
        })
    }

    /// Create a service talking to the public endpoints
    #[must_use]
    pub fn with_defaults(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: SpeechConfig::default(),
        }
    }

    /// Application ID the service authenticates as
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.credentials.app_id
    }

    /// Build the short-lived HTTP client used by one call
    fn http_client(&self) -> Result<Client, SpeechError> {
        Client::builder()
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .build()
            .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))
    }

    /// Map a transport error, reporting the configured timeout
    fn transport_error(&self, err: &reqwest::Error) -> SpeechError {
        SpeechError::from_reqwest(err, self.config.timeout_ms)
    }

    /// `cuid` sent upstream: caller id, configured default, or app id
    fn cuid<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.config.default_cuid.as_deref())
            .unwrap_or(&self.credentials.app_id)
    }

    /// Exchange the key pair for an access token
    #[instrument(skip(self, client))]
    async fn access_token(&self, client: &Client) -> Result<TokenGrant, SpeechError> {
        let response = client
            .post(&self.config.token_url)
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.api_key()),
                ("client_secret", self.credentials.secret_key()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(&e))?;
        let token: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            SpeechError::InvalidResponse(format!("HTTP {status}: unreadable token response: {e}"))
        })?;

        match token.access_token {
            Some(access_token) if token.error.is_none() && !access_token.is_empty() => {
                debug!(expires_in = ?token.expires_in, "Access token granted");
                Ok(TokenGrant::Granted(access_token))
            },
            _ => {
                let reason = token
                    .error_description
                    .or(token.error)
                    .unwrap_or_else(|| format!("token request rejected with HTTP {status}"));
                warn!(%reason, "Access token rejected");
                Ok(TokenGrant::Rejected(reason))
            },
        }
    }
}

/// OAuth token endpoint answer
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

enum TokenGrant {
    Granted(String),
    Rejected(String),
}

/// Recognition request body
#[derive(Debug, Serialize)]
struct AsrPayload<'a> {
    format: &'static str,
    rate: u32,
    channel: u8,
    token: &'a str,
    cuid: &'a str,
    lan: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback: Option<&'a str>,
}

/// Synthesis request form
#[derive(Debug, Serialize)]
struct TtsPayload<'a> {
    tex: &'a str,
    lan: &'static str,
    ctp: u8,
    tok: &'a str,
    cuid: &'a str,
    spd: u8,
    pit: u8,
    vol: u8,
    per: u8,
    aue: u8,
}

/// Synthesis error answer
#[derive(Debug, Deserialize)]
struct TtsErrorResponse {
    err_no: i64,
    #[serde(default)]
    err_msg: String,
}

#[async_trait]
impl SpeechService for BaiduSpeechService {
    #[instrument(
        skip(self, audio, options),
        fields(format = %format, rate = rate.as_hz(), local_audio = audio.is_some())
    )]
    async fn recognize(
        &self,
        audio: Option<Vec<u8>>,
        format: AudioFormat,
        rate: SampleRate,
        options: &AsrOptions,
    ) -> Result<AsrResponse, SpeechError> {
        let client = self.http_client()?;
        let token = match self.access_token(&client).await? {
            TokenGrant::Granted(token) => token,
            TokenGrant::Rejected(reason) => {
                return Ok(AsrResponse::rejected(status_code::ASR_AUTH_FAILED, reason));
            },
        };

        let payload = AsrPayload {
            format: format.as_str(),
            rate: rate.as_hz(),
            channel: ASR_CHANNELS,
            token: &token,
            cuid: self.cuid(options.cuid.as_deref()),
            lan: options.language.as_str(),
            len: audio.as_ref().map(Vec::len),
            speech: audio.as_deref().map(|bytes| BASE64.encode(bytes)),
            url: options.url.as_deref(),
            callback: options.callback.as_deref(),
        };

        debug!(len = ?payload.len, "Sending recognition request");

        let response = client
            .post(&self.config.asr_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(&e))?;

        match serde_json::from_slice::<AsrResponse>(&body) {
            Ok(answer) => {
                debug!(err_no = answer.err_no, alternatives = answer.result.len(), "Recognition answered");
                Ok(answer)
            },
            Err(e) if status.is_success() => Err(SpeechError::InvalidResponse(format!(
                "Failed to parse recognition response: {e}"
            ))),
            Err(_) => Err(SpeechError::RequestFailed(format!(
                "HTTP {status}: {}",
                String::from_utf8_lossy(&body)
            ))),
        }
    }

    #[instrument(skip(self, text, options), fields(text_len = text.len(), language = language.as_str()))]
    async fn synthesize(
        &self,
        text: &str,
        language: SynthesisLanguage,
        options: &TtsOptions,
    ) -> Result<SynthesisOutcome, SpeechError> {
        let client = self.http_client()?;
        let token = match self.access_token(&client).await? {
            TokenGrant::Granted(token) => token,
            TokenGrant::Rejected(reason) => {
                return Ok(SynthesisOutcome::ServiceError {
                    code: status_code::TTS_AUTH_FAILED,
                    message: reason,
                });
            },
        };

        let payload = TtsPayload {
            tex: text,
            lan: language.as_str(),
            ctp: TTS_CLIENT_TYPE,
            tok: &token,
            cuid: self.cuid(options.cuid.as_deref()),
            spd: options.speed,
            pit: options.pitch,
            vol: options.volume,
            per: options.person,
            aue: TTS_ENCODING_MP3,
        };

        let response = client
            .post(&self.config.tts_url)
            .form(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let is_audio = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok())
            .is_some_and(|mime| mime.type_() == mime::AUDIO);
        let body: Bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if status.is_success() && is_audio {
            debug!(audio_size = body.len(), "Speech synthesis complete");
            return Ok(SynthesisOutcome::Audio(body));
        }

        match serde_json::from_slice::<TtsErrorResponse>(&body) {
            Ok(error) => {
                debug!(err_no = error.err_no, "Synthesis rejected");
                Ok(SynthesisOutcome::ServiceError {
                    code: error.err_no,
                    message: error.err_msg,
                })
            },
            Err(e) => Err(SpeechError::InvalidResponse(format!(
                "HTTP {status}: neither audio nor error object: {e}"
            ))),
        }
    }
}

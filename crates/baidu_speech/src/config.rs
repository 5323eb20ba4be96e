//! Configuration for the speech client

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Application credentials issued by the speech console
///
/// Immutable once built; the two keys never show up in `Debug` output.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Application ID
    pub app_id: String,

    /// API key (client id of the token exchange)
    pub api_key: SecretString,

    /// Secret key (client secret of the token exchange)
    pub secret_key: SecretString,
}

impl Credentials {
    /// Bundle the credential triple
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: SecretString::from(api_key.into()),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// API key as plain text
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Secret key as plain text
    #[must_use]
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Endpoints and transport settings for the speech service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OAuth token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Speech recognition endpoint
    #[serde(default = "default_asr_url")]
    pub asr_url: String,

    /// Speech synthesis endpoint
    #[serde(default = "default_tts_url")]
    pub tts_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Client identifier sent when the caller gives no user id
    ///
    /// Falls back to the application id.
    #[serde(default)]
    pub default_cuid: Option<String>,
}

fn default_token_url() -> String {
    "https://aip.baidubce.com/oauth/2.0/token".to_string()
}

fn default_asr_url() -> String {
    "https://vop.baidu.com/server_api".to_string()
}

fn default_tts_url() -> String {
    "https://tsn.baidu.com/text2audio".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            asr_url: default_asr_url(),
            tts_url: default_tts_url(),
            timeout_ms: default_timeout_ms(),
            default_cuid: None,
        }
    }
}

impl SpeechConfig {
    /// Point every endpoint at one base URL (mock servers, proxies)
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{base}/oauth/2.0/token"),
            asr_url: format!("{base}/server_api"),
            tts_url: format!("{base}/text2audio"),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("token_url", &self.token_url),
            ("asr_url", &self.asr_url),
            ("tts_url", &self.tts_url),
        ] {
            if url.is_empty() {
                return Err(format!("{name} must not be empty"));
            }
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.default_cuid.as_deref().is_some_and(str::is_empty) {
            return Err("default_cuid must not be empty when set".to_string());
        }

        Ok(())
    }
}

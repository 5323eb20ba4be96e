//! Settings of the command line front-end
//!
//! Read from an optional configuration file, then overridden by
//! `BAIDU_SPEECH__*` environment variables, e.g.
//! `BAIDU_SPEECH__CREDENTIALS__APP_ID` or `BAIDU_SPEECH__SPEECH__TIMEOUT_MS`.

use baidu_speech::{Credentials, SpeechConfig};
use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BAIDU_SPEECH";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Everything the binary needs to build a client
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Application credentials
    pub credentials: Credentials,

    /// Endpoints and timeouts
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Tracing filter used when no `-v` flag is given
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Settings {
    /// Load settings from `file` (extension optional, may be absent) and the environment
    pub fn load(file: &str) -> Result<Self, config::ConfigError> {
        Self::load_layered(file, environment())
    }

    /// Load settings from `file`, overridden by `env`
    fn load_layered(file: &str, env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}

/// `BAIDU_SPEECH__SECTION__KEY` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

//! Baidu speech CLI
//!
//! Command-line front-end for speech recognition and synthesis.

#![allow(clippy::print_stdout)]

mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use baidu_speech::{RecognitionRequest, SpeechClient, SpeechResponse, SynthesisRequest};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

/// Baidu speech CLI
#[derive(Parser)]
#[command(name = "baidu-speech")]
#[command(author, version, about = "Baidu speech recognition and synthesis", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (extension optional, may be absent)
    #[arg(short, long, env = "BAIDU_SPEECH_CONFIG", default_value = "baidu-speech")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize speech from a local file or a URL
    ///
    /// A local file wins when both are given.
    /// Example: baidu-speech recognize --file ./hello.wav
    Recognize(RecognizeArgs),

    /// Synthesize text into an mp3 file below a storage directory
    ///
    /// Example: baidu-speech synthesize --storage ./audio --text "你好"
    Synthesize(SynthesizeArgs),
}

#[derive(Args)]
struct RecognizeArgs {
    /// Local audio file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Remote audio URL
    #[arg(short, long)]
    url: Option<String>,

    /// Callback URL for remote audio
    #[arg(long)]
    callback: Option<String>,

    /// User identifier forwarded as cuid
    #[arg(long)]
    user_id: Option<String>,

    /// Audio format (pcm, wav, opus, speex, amr)
    #[arg(long, default_value = "wav")]
    format: String,

    /// Sample rate in Hz (8000 or 16000)
    #[arg(long, default_value_t = 16000)]
    rate: u32,

    /// Language (zh, ct, en)
    #[arg(long, default_value = "zh")]
    lang: String,
}

impl From<RecognizeArgs> for RecognitionRequest {
    fn from(args: RecognizeArgs) -> Self {
        Self {
            file_path: args.file,
            url: args.url,
            callback: args.callback,
            user_id: args.user_id,
            format: args.format,
            rate: args.rate,
            language: args.lang,
        }
    }
}

#[derive(Args)]
struct SynthesizeArgs {
    /// Storage root for synthesized files
    #[arg(short, long)]
    storage: PathBuf,

    /// Text to synthesize
    #[arg(short, long)]
    text: String,

    /// User identifier forwarded as cuid
    #[arg(long)]
    user_id: Option<String>,

    /// Language (zh)
    #[arg(long, default_value = "zh")]
    lang: String,

    /// Speed, 0-9
    #[arg(long, default_value_t = 5)]
    speed: u8,

    /// Pitch, 0-9
    #[arg(long, default_value_t = 5)]
    pitch: u8,

    /// Volume, 0-15
    #[arg(long, default_value_t = 5)]
    volume: u8,

    /// Voice persona, 0-4
    #[arg(long, default_value_t = 0)]
    person: u8,
}

impl From<SynthesizeArgs> for SynthesisRequest {
    fn from(args: SynthesizeArgs) -> Self {
        Self {
            storage_path: args.storage,
            text: args.text,
            user_id: args.user_id,
            language: args.lang,
            speed: args.speed,
            pitch: args.pitch,
            volume: args.volume,
            person: args.person,
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `-v` flags win over the configured filter
fn log_filter(verbose: u8, configured: Option<&str>) -> String {
    match configured {
        Some(filter) if verbose == 0 => filter.to_string(),
        _ => log_filter_from_verbosity(verbose).to_string(),
    }
}

/// Process exit status for an envelope
const fn exit_status(response: &SpeechResponse) -> u8 {
    if response.success { 0 } else { 1 }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load settings from '{}'", cli.config))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter(
            cli.verbose,
            settings.log_filter.as_deref(),
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = SpeechClient::with_config(settings.credentials, settings.speech)
        .context("Invalid speech configuration")?;

    let response = match cli.command {
        Commands::Recognize(args) => {
            info!(file = ?args.file, url = ?args.url, "Recognizing speech");
            client.recognize(&args.into()).await
        },
        Commands::Synthesize(args) => {
            info!(
                storage = %args.storage.display(),
                text_len = args.text.len(),
                "Synthesizing speech"
            );
            client.synthesize(&args.into()).await
        },
    };

    if !response.success {
        warn!(message = %response.message, "Speech operation failed");
    }

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(ExitCode::from(exit_status(&response)))
}

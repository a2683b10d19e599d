use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use transnow::voice::{ElevenLabsTts, WhisperStt};
use transnow::{Config, VoiceSession, primary_subtag};

/// TransNow - Voice translation gateway
#[derive(Parser)]
#[command(name = "transnow", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "TRANSNOW_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a piece of text directly through the configured provider
    TestTranslate {
        /// Text to translate
        text: String,
        /// Target language tag (defaults to the configured session language)
        language: Option<String>,
    },
    /// Run one full voice turn from a WAV file against a running gateway
    Turn {
        /// Path to a WAV recording of the utterance
        audio: PathBuf,
        /// Target language tag (defaults to the configured session language)
        #[arg(short, long)]
        language: Option<String>,
        /// Write synthesized speech (MP3) to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Translate endpoint URL (defaults to the local gateway)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,transnow=info",
        1 => "info,transnow=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestTranslate { text, language } => {
                let language = config.session_language(language);
                test_translate(&config, &text, &language).await
            }
            Command::Turn {
                audio,
                language,
                output,
                server,
            } => {
                let language = config.session_language(language);
                run_voice_turn(&config, &audio, language, output, server).await
            }
        };
    }

    // Default: serve the translation proxy
    let provider = config.build_provider()?;
    let server = transnow::api::ApiServer::new(provider, config.port);
    server.run().await?;

    Ok(())
}

/// Exercise the configured translation provider directly
async fn test_translate(config: &Config, text: &str, language: &str) -> anyhow::Result<()> {
    let provider = config.build_provider()?;
    let target = primary_subtag(language);

    tracing::info!(provider = provider.name(), target_lang = %target, "translating");
    let translated = provider.translate(text, target).await?;
    println!("{translated}");

    Ok(())
}

/// Run one capture → translate → synthesize turn against a running gateway
async fn run_voice_turn(
    config: &Config,
    audio_path: &PathBuf,
    language: String,
    output: Option<PathBuf>,
    server: Option<String>,
) -> anyhow::Result<()> {
    let openai_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let elevenlabs_key = std::env::var("ELEVENLABS_API_KEY").unwrap_or_default();

    let stt = Arc::new(WhisperStt::new(openai_key, config.voice.stt_model.clone())?);
    let tts = Arc::new(ElevenLabsTts::new(
        elevenlabs_key,
        config.voice.tts_model.clone(),
    )?);

    let proxy_url =
        server.unwrap_or_else(|| format!("http://127.0.0.1:{}/api/translate", config.port));

    let mut session = VoiceSession::new(stt, tts, proxy_url, language);
    session.on_voices_changed().await?;

    let audio = std::fs::read(audio_path)?;
    let Some(outcome) = session.run_turn(&audio).await? else {
        anyhow::bail!("turn aborted (see logs)");
    };

    println!("original:    {}", outcome.transcript);
    println!("translation: {}", outcome.translation);

    match (output, outcome.audio) {
        (Some(path), Some(bytes)) => {
            std::fs::write(&path, bytes)?;
            tracing::info!(path = %path.display(), "synthesized speech written");
        }
        (Some(_), None) => tracing::warn!("no audio produced (no matching voice?)"),
        _ => {}
    }

    Ok(())
}

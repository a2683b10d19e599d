//! Configuration management for the TransNow gateway

pub mod file;

use std::sync::Arc;

use crate::translate::{GoogleTranslate, MockMode, MockTranslate, TranslationProvider};
use crate::{Error, Result};

pub use file::TransnowConfigFile;

/// Default API server port
pub const DEFAULT_PORT: u16 = 8787;

/// Translation provider backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Google Translate API v2 (requires `GOOGLE_TRANSLATE_API_KEY`)
    Google,
    /// Deterministic mock, for tests and offline runs
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "mock" => Ok(Self::Mock),
            other => Err(Error::Config(format!("unknown provider: {other}"))),
        }
    }
}

/// Gateway configuration
///
/// Environment variables take precedence over the config file, which takes
/// precedence over defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// API server port
    pub port: u16,

    /// Translation provider backend
    pub provider: ProviderKind,

    /// Voice capability configuration
    pub voice: VoiceConfig,
}

/// Voice capability configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// STT model identifier (e.g. "whisper-1")
    pub stt_model: String,

    /// TTS model identifier (e.g. "eleven_monolingual_v1")
    pub tts_model: String,

    /// Session language tag (e.g. "en-US")
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            stt_model: "whisper-1".to_string(),
            tts_model: "eleven_monolingual_v1".to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment and the optional config file
    ///
    /// # Errors
    ///
    /// Returns error if the config file is malformed or an env value cannot
    /// be parsed
    pub fn load() -> Result<Self> {
        let file = TransnowConfigFile::load()?;

        let port = match std::env::var("TRANSNOW_PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("invalid TRANSNOW_PORT: {v}")))?,
            Err(_) => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let provider = std::env::var("TRANSNOW_PROVIDER")
            .ok()
            .or(file.translate.provider)
            .map_or(Ok(ProviderKind::Google), |v| v.parse())?;

        let defaults = VoiceConfig::default();
        let voice = VoiceConfig {
            stt_model: file.voice.stt_model.unwrap_or(defaults.stt_model),
            tts_model: file.voice.tts_model.unwrap_or(defaults.tts_model),
            language: std::env::var("TRANSNOW_LANGUAGE")
                .ok()
                .or(file.voice.language)
                .unwrap_or(defaults.language),
        };

        Ok(Self {
            port,
            provider,
            voice,
        })
    }

    /// Session language for a turn: an explicit override wins, otherwise
    /// the configured default (`TRANSNOW_LANGUAGE` / `[voice] language`)
    #[must_use]
    pub fn session_language(&self, override_tag: Option<String>) -> String {
        override_tag.unwrap_or_else(|| self.voice.language.clone())
    }

    /// Construct the configured translation provider
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be initialized (e.g. missing
    /// API key)
    pub fn build_provider(&self) -> Result<Arc<dyn TranslationProvider>> {
        match self.provider {
            ProviderKind::Google => Ok(Arc::new(GoogleTranslate::from_env()?)),
            ProviderKind::Mock => Ok(Arc::new(MockTranslate::new(MockMode::Suffix))),
        }
    }
}

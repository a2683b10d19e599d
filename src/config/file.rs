//! TOML configuration file loading
//!
//! Supports `~/.config/transnow/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct TransnowConfigFile {
    /// Translation provider configuration
    #[serde(default)]
    pub translate: TranslateFileConfig,

    /// Voice/capability configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// Translation provider configuration
#[derive(Debug, Default, Deserialize)]
pub struct TranslateFileConfig {
    /// Provider backend ("google" or "mock")
    pub provider: Option<String>,
}

/// Voice capability configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// STT model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// TTS model (e.g. "eleven_monolingual_v1")
    pub tts_model: Option<String>,

    /// Session language tag (e.g. "pt-BR")
    pub language: Option<String>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,
}

impl TransnowConfigFile {
    /// Default config file path (`~/.config/transnow/config.toml`)
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "transnow", "transnow")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config file if it exists; absent file yields defaults
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

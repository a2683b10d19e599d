//! Text-to-speech capability
//!
//! Enumerates available voice profiles and renders text as audio. Voices
//! carry a language tag so the session controller can match them against
//! the selected language.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Error, Result};

/// A voice descriptor exposed by a TTS capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Provider-specific voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// IETF-style language tag (e.g. "en-US")
    pub language: String,
}

/// Text-to-speech capability
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Enumerate available voice profiles, in provider order
    ///
    /// # Errors
    ///
    /// Returns error if the voice list cannot be fetched
    async fn voices(&self) -> Result<Vec<VoiceProfile>>;

    /// Render text as audio using the given voice
    ///
    /// Returns encoded audio bytes (MP3 for the ElevenLabs backend).
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<Vec<u8>>;
}

#[derive(Deserialize)]
struct ElevenLabsVoiceList {
    voices: Vec<ElevenLabsVoice>,
}

#[derive(Deserialize)]
struct ElevenLabsVoice {
    voice_id: String,
    name: String,
    #[serde(default)]
    labels: std::collections::HashMap<String, String>,
}

/// ElevenLabs-backed text-to-speech
pub struct ElevenLabsTts {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl ElevenLabsTts {
    /// Create a new ElevenLabs TTS instance
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "ElevenLabs API key required for TTS".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsTts {
    async fn voices(&self) -> Result<Vec<VoiceProfile>> {
        let response = self
            .client
            .get("https://api.elevenlabs.io/v1/voices")
            .header("xi-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "ElevenLabs voices error");
            return Err(Error::Tts(format!(
                "ElevenLabs voices error {status}: {body}"
            )));
        }

        let body = response.bytes().await?;
        let list: ElevenLabsVoiceList = serde_json::from_slice(&body)?;

        let profiles = list
            .voices
            .into_iter()
            .map(|v| {
                let language = v
                    .labels
                    .get("language")
                    .cloned()
                    .unwrap_or_else(|| "en-US".to_string());
                VoiceProfile {
                    id: v.voice_id,
                    name: v.name,
                    language,
                }
            })
            .collect();

        Ok(profiles)
    }

    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SynthesizeRequest<'a> {
            text: &'a str,
            model_id: &'a str,
        }

        let url = format!("https://api.elevenlabs.io/v1/text-to-speech/{}", voice.id);

        let request = SynthesizeRequest {
            text,
            model_id: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "ElevenLabs TTS error");
            return Err(Error::Tts(format!("ElevenLabs TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

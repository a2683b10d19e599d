//! Voice registry
//!
//! Process-wide view of the voices a TTS capability exposes. Populated by
//! an explicit `refresh` (run once at startup and again on a voices-changed
//! notification), never torn down. Selection is an exact language-tag
//! match, first voice wins.

use crate::Result;
use crate::voice::tts::{TextToSpeech, VoiceProfile};

/// Ordered set of available voice descriptors
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    voices: Vec<VoiceProfile>,
}

impl VoiceRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a fixed voice list (used by tests)
    #[must_use]
    pub fn from_voices(voices: Vec<VoiceProfile>) -> Self {
        Self { voices }
    }

    /// Replace the stored voices with the capability's current list
    ///
    /// # Errors
    ///
    /// Returns error if the voice list cannot be fetched; the previous
    /// list is kept in that case
    pub async fn refresh(&mut self, tts: &dyn TextToSpeech) -> Result<()> {
        let voices = tts.voices().await?;
        tracing::debug!(count = voices.len(), "voice registry refreshed");
        self.voices = voices;
        Ok(())
    }

    /// Find the first voice whose language tag matches exactly
    #[must_use]
    pub fn find(&self, language: &str) -> Option<&VoiceProfile> {
        self.voices.iter().find(|v| v.language == language)
    }

    /// Deduplicated language tags, in enumeration order
    #[must_use]
    pub fn supported_languages(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.voices
            .iter()
            .map(|v| v.language.as_str())
            .filter(|lang| seen.insert(*lang))
            .collect()
    }

    /// Whether any voices are available
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

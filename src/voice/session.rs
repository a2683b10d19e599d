//! Voice session controller
//!
//! Orchestrates one translation turn: capture-complete hands a transcript
//! to the translation proxy, and the translated text is rendered through
//! the voice matching the session's language tag. The session is a finite
//! state machine; a new capture cannot start while a turn is active.
//!
//! Proxy failures never surface to the end user: a failed turn is logged
//! and the session resets to idle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::voice::stt::SpeechToText;
use crate::voice::tts::TextToSpeech;
use crate::voice::voices::VoiceRegistry;
use crate::{Error, Result};

/// State of a voice session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the user to start a capture
    Idle,
    /// Capturing speech
    Listening,
    /// Awaiting the translation proxy
    Processing,
    /// Rendering the translated text as speech
    Speaking,
}

/// Result of a completed translation turn
#[derive(Debug)]
pub struct TurnOutcome {
    /// What the user said
    pub transcript: String,
    /// The translated text returned by the proxy
    pub translation: String,
    /// Synthesized audio, when a matching voice was available and
    /// synthesis succeeded
    pub audio: Option<Vec<u8>>,
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
struct ProxyResponse {
    text: String,
}

/// Drives capture → proxy → playback for a single user
pub struct VoiceSession {
    state: SessionState,
    language: String,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
    registry: VoiceRegistry,
    client: reqwest::Client,
    proxy_url: String,
}

impl VoiceSession {
    /// Create a new idle session
    ///
    /// `proxy_url` is the full translate endpoint URL
    /// (e.g. `http://127.0.0.1:8787/api/translate`).
    #[must_use]
    pub fn new(
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        proxy_url: String,
        language: String,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            language,
            stt,
            tts,
            registry: VoiceRegistry::new(),
            client: reqwest::Client::new(),
            proxy_url,
        }
    }

    /// Current session state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Currently selected language tag
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the target language for subsequent turns
    pub fn set_language(&mut self, language: String) {
        self.language = language;
    }

    /// Voice registry for this session
    #[must_use]
    pub fn registry(&self) -> &VoiceRegistry {
        &self.registry
    }

    /// Populate the voice registry from the TTS capability
    ///
    /// Run once at startup; call again whenever the capability signals
    /// that its voice list changed.
    ///
    /// # Errors
    ///
    /// Returns error if the voice list cannot be fetched
    pub async fn on_voices_changed(&mut self) -> Result<()> {
        self.registry.refresh(self.tts.as_ref()).await
    }

    /// Begin a capture: Idle → Listening
    ///
    /// # Errors
    ///
    /// Returns error if a turn is already active (single-flight per
    /// session) or no voices have been enumerated
    pub fn begin_capture(&mut self) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(Error::Voice(format!(
                "capture already active (state: {:?})",
                self.state
            )));
        }
        if self.registry.is_empty() {
            return Err(Error::Voice("no voices available".to_string()));
        }

        self.state = SessionState::Listening;
        tracing::debug!("capture started");
        Ok(())
    }

    /// Capture failed or was inconclusive: reset to Idle, no network call
    pub fn capture_error(&mut self) {
        tracing::debug!(state = ?self.state, "capture error, resetting");
        self.state = SessionState::Idle;
    }

    /// Capture finished: translate the transcript and render it
    ///
    /// Issues exactly one proxy call. Any failure (non-success status,
    /// network error) silently aborts the turn; the session always ends
    /// at Idle. Returns `None` when the turn was aborted.
    pub async fn capture_complete(&mut self, transcript: String) -> Option<TurnOutcome> {
        if self.state != SessionState::Listening {
            tracing::warn!(state = ?self.state, "capture_complete outside of a capture");
            self.state = SessionState::Idle;
            return None;
        }

        self.state = SessionState::Processing;
        let translation = self.call_proxy(&transcript).await;
        let Some(translation) = translation else {
            self.state = SessionState::Idle;
            return None;
        };

        self.state = SessionState::Speaking;
        let audio = self.speak(&translation).await;
        self.state = SessionState::Idle;

        Some(TurnOutcome {
            transcript,
            translation,
            audio,
        })
    }

    /// Run a full turn from captured audio bytes
    ///
    /// Convenience wrapper: transcribe, then translate and render.
    /// Recognition failures abort the turn silently, as in
    /// `capture_error`.
    ///
    /// # Errors
    ///
    /// Returns error only for session misuse (turn already active, no
    /// voices); recognition and proxy failures yield `Ok(None)`
    pub async fn run_turn(&mut self, audio: &[u8]) -> Result<Option<TurnOutcome>> {
        self.begin_capture()?;

        let transcript = match self.stt.transcribe(audio).await {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(error = %e, "recognition failed");
                self.capture_error();
                return Ok(None);
            }
        };

        Ok(self.capture_complete(transcript).await)
    }

    /// One best-effort call to the translation proxy
    async fn call_proxy(&self, text: &str) -> Option<String> {
        let request = ProxyRequest {
            text,
            language: &self.language,
        };

        let response = match self.client.post(&self.proxy_url).json(&request).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "translation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "translation rejected");
            return None;
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!(error = %e, "failed to read translation response");
                return None;
            }
        };

        match serde_json::from_slice::<ProxyResponse>(&body) {
            Ok(parsed) => Some(parsed.text),
            Err(e) => {
                tracing::debug!(error = %e, "malformed translation response");
                None
            }
        }
    }

    /// Render the translation with the voice matching the session language
    async fn speak(&self, text: &str) -> Option<Vec<u8>> {
        let Some(voice) = self.registry.find(&self.language) else {
            tracing::debug!(language = %self.language, "no matching voice");
            return None;
        };

        match self.tts.synthesize(text, voice).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                tracing::debug!(error = %e, voice = %voice.id, "synthesis failed");
                None
            }
        }
    }
}

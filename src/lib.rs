//! TransNow Gateway - Voice translation gateway
//!
//! This library provides the core functionality for the TransNow gateway:
//! - Translation proxy (HTTP endpoint forwarding to a translation provider)
//! - Voice session orchestration (capture → translate → playback)
//! - Capability interfaces for speech-to-text and text-to-speech
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                Voice Session                         │
//! │   Capture  │  Voice Registry  │  Playback           │
//! └────────────────────┬────────────────────────────────┘
//!                      │ POST /api/translate
//! ┌────────────────────▼────────────────────────────────┐
//! │              Translation Proxy                       │
//! │   validate  │  normalize tag  │  one provider call  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │          Translation Provider (external)             │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod translate;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use translate::{GoogleTranslate, MockTranslate, TranslationProvider, primary_subtag};
pub use voice::{
    SessionState, SpeechToText, TextToSpeech, TurnOutcome, VoiceProfile, VoiceRegistry,
    VoiceSession,
};

//! Voice session module
//!
//! Speech capture and playback are host capabilities consumed through
//! narrow traits; the session controller ties them to the translation
//! proxy.

mod session;
mod stt;
mod tts;
mod voices;

pub use session::{SessionState, TurnOutcome, VoiceSession};
pub use stt::{SpeechToText, WhisperStt};
pub use tts::{ElevenLabsTts, TextToSpeech, VoiceProfile};
pub use voices::VoiceRegistry;

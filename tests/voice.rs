//! Voice session integration tests
//!
//! Exercises the session state machine against an in-process gateway with
//! mock capabilities; no audio hardware or external services involved.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_test::assert_ok;

use transnow::api::ApiServer;
use transnow::translate::MockTranslate;
use transnow::voice::{SpeechToText, TextToSpeech, VoiceProfile};
use transnow::{Error, Result, SessionState, VoiceSession};

mod common;
use common::{hola_provider, suffix_provider};

/// STT double that returns a fixed transcript
struct StaticStt(String);

#[async_trait]
impl SpeechToText for StaticStt {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// STT double that always fails
struct FailingStt;

#[async_trait]
impl SpeechToText for FailingStt {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        Err(Error::Stt("no speech detected".to_string()))
    }
}

/// TTS double with a fixed voice list
struct StaticTts {
    voices: Vec<VoiceProfile>,
    fail_synthesis: bool,
}

impl StaticTts {
    fn with_languages(tags: &[&str]) -> Self {
        let voices = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| VoiceProfile {
                id: format!("voice-{i}"),
                name: format!("Voice {i}"),
                language: (*tag).to_string(),
            })
            .collect();
        Self {
            voices,
            fail_synthesis: false,
        }
    }
}

#[async_trait]
impl TextToSpeech for StaticTts {
    async fn voices(&self) -> Result<Vec<VoiceProfile>> {
        Ok(self.voices.clone())
    }

    async fn synthesize(&self, _text: &str, _voice: &VoiceProfile) -> Result<Vec<u8>> {
        if self.fail_synthesis {
            return Err(Error::Tts("synthesis unavailable".to_string()));
        }
        Ok(b"mp3-bytes".to_vec())
    }
}

/// Spawn a gateway on an ephemeral port, returning its translate URL
async fn spawn_gateway(provider: Arc<MockTranslate>) -> String {
    let app = ApiServer::new(provider, 0).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api/translate")
}

fn session_with(
    stt: impl SpeechToText + 'static,
    tts: StaticTts,
    proxy_url: String,
    language: &str,
) -> VoiceSession {
    VoiceSession::new(
        Arc::new(stt),
        Arc::new(tts),
        proxy_url,
        language.to_string(),
    )
}

#[tokio::test]
async fn capture_requires_enumerated_voices() {
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&[]),
        "http://127.0.0.1:1/api/translate".to_string(),
        "es-ES",
    );

    // Registry never populated: capability unavailable, abort before
    // any network call
    assert!(session.begin_capture().is_err());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn capture_is_single_flight() {
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES"]),
        "http://127.0.0.1:1/api/translate".to_string(),
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    tokio_test::assert_ok!(session.begin_capture());
    assert_eq!(session.state(), SessionState::Listening);

    // A second capture cannot start while one is active
    match session.begin_capture() {
        Err(Error::Voice(msg)) => assert!(msg.contains("already active")),
        other => panic!("expected Voice error, got {other:?}"),
    }
}

#[tokio::test]
async fn capture_error_resets_to_idle() {
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES"]),
        "http://127.0.0.1:1/api/translate".to_string(),
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    session.begin_capture().unwrap();
    session.capture_error();
    assert_eq!(session.state(), SessionState::Idle);

    // Session is usable again after a reset
    assert!(session.begin_capture().is_ok());
}

#[tokio::test]
async fn capture_complete_outside_capture_is_ignored() {
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES"]),
        "http://127.0.0.1:1/api/translate".to_string(),
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.capture_complete("hello".to_string()).await;
    assert!(outcome.is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn full_turn_translates_and_speaks() {
    let provider = hola_provider();
    let proxy_url = spawn_gateway(provider.clone()).await;

    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["en-US", "es-ES"]),
        proxy_url,
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap().unwrap();

    assert_eq!(outcome.transcript, "hello");
    assert_eq!(outcome.translation, "hola");
    assert_eq!(outcome.audio.as_deref(), Some(b"mp3-bytes".as_slice()));
    assert_eq!(session.state(), SessionState::Idle);

    // The proxy reduced the session tag before calling the provider
    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.last_target(), Some("es".to_string()));
}

#[tokio::test]
async fn proxy_failure_aborts_turn_silently() {
    let provider = Arc::new(MockTranslate::new(
        transnow::translate::MockMode::Error("upstream down".to_string()),
    ));
    let proxy_url = spawn_gateway(provider.clone()).await;

    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES"]),
        proxy_url,
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap();
    assert!(outcome.is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn network_failure_aborts_turn_silently() {
    // Nothing is listening on this port
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES"]),
        "http://127.0.0.1:9/api/translate".to_string(),
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap();
    assert!(outcome.is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn recognition_failure_makes_no_proxy_call() {
    let provider = suffix_provider();
    let proxy_url = spawn_gateway(provider.clone()).await;

    let mut session = session_with(
        FailingStt,
        StaticTts::with_languages(&["es-ES"]),
        proxy_url,
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap();
    assert!(outcome.is_none());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn missing_voice_yields_translation_without_audio() {
    let provider = suffix_provider();
    let proxy_url = spawn_gateway(provider.clone()).await;

    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["en-US"]),
        proxy_url,
        "pt-BR",
    );
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap().unwrap();
    assert_eq!(outcome.translation, "hello [pt]");
    assert!(outcome.audio.is_none());
}

#[tokio::test]
async fn synthesis_failure_yields_translation_without_audio() {
    let provider = suffix_provider();
    let proxy_url = spawn_gateway(provider.clone()).await;

    let tts = StaticTts {
        voices: vec![VoiceProfile {
            id: "v0".to_string(),
            name: "Voice".to_string(),
            language: "es-ES".to_string(),
        }],
        fail_synthesis: true,
    };

    let mut session = session_with(StaticStt("hello".to_string()), tts, proxy_url, "es-ES");
    session.on_voices_changed().await.unwrap();

    let outcome = session.run_turn(b"wav-bytes").await.unwrap().unwrap();
    assert_eq!(outcome.translation, "hello [es]");
    assert!(outcome.audio.is_none());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn voices_changed_repopulates_registry() {
    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["en-US", "pt-BR", "en-US"]),
        "http://127.0.0.1:1/api/translate".to_string(),
        "pt-BR",
    );

    assert!(session.registry().is_empty());
    session.on_voices_changed().await.unwrap();

    assert_eq!(
        session.registry().supported_languages(),
        vec!["en-US", "pt-BR"]
    );
    assert_eq!(session.registry().find("pt-BR").unwrap().id, "voice-1");
}

#[tokio::test]
async fn language_can_change_between_turns() {
    let provider = suffix_provider();
    let proxy_url = spawn_gateway(provider.clone()).await;

    let mut session = session_with(
        StaticStt("hello".to_string()),
        StaticTts::with_languages(&["es-ES", "de-DE"]),
        proxy_url,
        "es-ES",
    );
    session.on_voices_changed().await.unwrap();

    session.run_turn(b"wav").await.unwrap().unwrap();
    assert_eq!(provider.last_target(), Some("es".to_string()));

    session.set_language("de-DE".to_string());
    session.run_turn(b"wav").await.unwrap().unwrap();
    assert_eq!(provider.last_target(), Some("de".to_string()));
    assert_eq!(provider.calls(), 2);
}

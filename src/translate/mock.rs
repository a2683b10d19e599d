//! Mock translation provider for tests and offline runs

use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::translate::TranslationProvider;
use crate::{Error, Result};

/// Mock translation modes
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target language as a suffix: "hello" → "hello [pt]"
    Suffix,

    /// Use predefined (text, target) → translation mappings; unmapped
    /// inputs fall back to suffix mode
    Mappings(HashMap<(String, String), String>),

    /// Fail every call with the given message
    Error(String),
}

/// Deterministic translator that never touches the network
///
/// Records every call so tests can assert on invocation counts and the
/// exact language code the proxy handed over.
#[derive(Debug)]
pub struct MockTranslate {
    mode: MockMode,
    calls: AtomicUsize,
    last_target: std::sync::Mutex<Option<String>>,
}

impl MockTranslate {
    /// Create a new mock with the given mode
    #[must_use]
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            last_target: std::sync::Mutex::new(None),
        }
    }

    /// Number of translate calls made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Target language code of the most recent call, if any
    #[must_use]
    pub fn last_target(&self) -> Option<String> {
        self.last_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TranslationProvider for MockTranslate {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_target
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(target.to_string());

        match &self.mode {
            MockMode::Suffix => Ok(format!("{text} [{target}]")),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{text} [{target}]")))
            }
            MockMode::Error(msg) => Err(Error::Translation(msg.clone())),
        }
    }

    fn name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn suffix_mode() {
        let mock = MockTranslate::new(MockMode::Suffix);
        let result = mock.translate("hello", "pt").await.unwrap();
        assert_eq!(result, "hello [pt]");
    }

    #[tokio::test]
    async fn mapping_mode() {
        let mut map = HashMap::new();
        map.insert(("hello".to_string(), "es".to_string()), "hola".to_string());

        let mock = MockTranslate::new(MockMode::Mappings(map));
        assert_eq!(mock.translate("hello", "es").await.unwrap(), "hola");

        // Unmapped input falls back to suffix
        assert_eq!(mock.translate("bye", "es").await.unwrap(), "bye [es]");
    }

    #[tokio::test]
    async fn error_mode() {
        let mock = MockTranslate::new(MockMode::Error("API unavailable".to_string()));
        let result = mock.translate("hello", "fr").await;
        match result {
            Err(Error::Translation(msg)) => assert_eq!(msg, "API unavailable"),
            _ => panic!("expected Translation error"),
        }
    }

    #[tokio::test]
    async fn last_target_survives_poisoned_lock() {
        let mock = MockTranslate::new(MockMode::Suffix);
        mock.translate("a", "de").await.unwrap();

        // Poison the lock by panicking while holding the guard
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = mock.last_target.lock().unwrap();
            panic!("poison");
        }));

        assert_eq!(mock.last_target(), Some("de".to_string()));
        mock.translate("b", "ja").await.unwrap();
        assert_eq!(mock.last_target(), Some("ja".to_string()));
    }

    #[tokio::test]
    async fn records_calls_and_target() {
        let mock = MockTranslate::new(MockMode::Suffix);
        assert_eq!(mock.calls(), 0);
        assert_eq!(mock.last_target(), None);

        mock.translate("a", "de").await.unwrap();
        mock.translate("b", "ja").await.unwrap();

        assert_eq!(mock.calls(), 2);
        assert_eq!(mock.last_target(), Some("ja".to_string()));
    }
}

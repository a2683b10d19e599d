//! Translation provider trait

use async_trait::async_trait;

use crate::Result;

/// Generic trait for translation providers
///
/// Implementations handle the actual translation work, whether through an
/// API (Google Translate) or deterministic logic (mock). The proxy issues
/// exactly one call per request: no batching, no caching, no retry.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` into the language named by `target`
    ///
    /// `target` is a primary language subtag (e.g. `pt`, not `pt-BR`);
    /// callers are expected to normalize the tag first.
    ///
    /// # Errors
    ///
    /// Returns error if the provider rejects the request or the network
    /// call fails.
    async fn translate(&self, text: &str, target: &str) -> Result<String>;

    /// Name of this provider, for logging
    fn name(&self) -> &str;
}

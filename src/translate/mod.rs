//! Translation provider capability
//!
//! The proxy endpoint delegates here. `TranslationProvider` is the narrow
//! seam between the gateway and the external translation service; the
//! Google client is the production backend and the mock is used by tests
//! and offline runs.

mod google;
mod language;
mod mock;
mod provider;

pub use google::GoogleTranslate;
pub use language::primary_subtag;
pub use mock::{MockMode, MockTranslate};
pub use provider::TranslationProvider;

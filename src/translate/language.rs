//! IETF language tag handling

/// Reduce a language tag to its primary subtag
///
/// A tag of form `<primary>-<region>` is reduced to `<primary>` before
/// being passed to the translation provider (`pt-BR` → `pt`). A tag with
/// no hyphen is returned unchanged. The primary subtag is not validated
/// against any list of supported languages; an unsupported code is passed
/// through and the provider's rejection surfaces as a generic failure.
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

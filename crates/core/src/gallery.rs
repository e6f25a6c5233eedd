//! Model selection rules for the read-only views.
//!
//! The gallery shows a fixed set of flagship models side by side, the
//! homepage features one group drawn by two of them, and the single-group
//! view can be narrowed by provider.

use crate::error::CoreError;

/// Models whose artworks appear in the category gallery (exact match,
/// case-insensitive).
pub const GALLERY_MODELS: &[&str] = &[
    "anthropic/claude-sonnet-4",
    "google/gemini-2.5-pro",
    "openai/gpt-5",
];

/// Model pair compared on the homepage (substring match).
pub const FEATURED_PAIR: (&str, &str) = ("anthropic/claude-sonnet-4", "openai/gpt-5");

/// Looser pair tried when no group has artworks from [`FEATURED_PAIR`].
pub const FALLBACK_FEATURED_PAIR: (&str, &str) = ("anthropic", "openai");

/// Whether an artwork by `model` belongs in the category gallery.
pub fn is_gallery_model(model: &str) -> bool {
    !model.is_empty()
        && GALLERY_MODELS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(model))
}

/// Provider filter accepted by the single-group view (`?model=openai`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFilter {
    OpenAi,
    Anthropic,
    Google,
    /// Anything not from the three named providers.
    Other,
}

/// Providers that [`ProviderFilter::Other`] excludes.
const NAMED_PROVIDERS: &[&str] = &["openai", "anthropic", "google"];

impl ProviderFilter {
    /// Parse a filter value, case-insensitively.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "google" => Ok(Self::Google),
            "other" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "unknown model filter '{other}', expected one of openai, anthropic, google, other"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Other => "other",
        }
    }

    /// Whether `model` passes this filter.
    pub fn matches(self, model: &str) -> bool {
        let model = model.to_ascii_lowercase();
        match self {
            Self::OpenAi => model.contains("openai"),
            Self::Anthropic => model.contains("anthropic"),
            Self::Google => model.contains("google"),
            Self::Other => !NAMED_PROVIDERS.iter().any(|p| model.contains(p)),
        }
    }
}

/// Whether `model` passes any of `filters`. An empty filter list passes
/// everything.
pub fn matches_any(filters: &[ProviderFilter], model: &str) -> bool {
    filters.is_empty() || filters.iter().any(|f| f.matches(model))
}

/// Path of a category's gallery page, with the name percent-encoded as a
/// single path segment.
pub fn category_path(category: &str) -> String {
    let mut path = String::from("/gallery/category/");
    for byte in category.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                path.push(byte as char)
            }
            _ => path.push_str(&format!("%{byte:02X}")),
        }
    }
    path
}

//! Generation parameter bounds and group/artwork field validation.
//!
//! Handlers call these before any workflow logic runs, so the repositories
//! only ever see values that satisfy the persisted invariants: a group has
//! a non-empty title and prompt, and an artwork carries a model id plus a
//! temperature and token budget inside the bounds below.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Parameter bounds and defaults
// ---------------------------------------------------------------------------

/// Lowest sampling temperature accepted by the chat-completion API.
pub const MIN_TEMPERATURE: f64 = 0.0;
/// Highest sampling temperature accepted by the chat-completion API.
pub const MAX_TEMPERATURE: f64 = 2.0;
/// Temperature used when a request omits one.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Smallest output token budget.
pub const MIN_MAX_TOKENS: i64 = 1;
/// Largest output token budget.
pub const MAX_MAX_TOKENS: i64 = 200_000;
/// Output token budget used when a request omits one.
pub const DEFAULT_MAX_TOKENS: i64 = 50_000;

/// Longest accepted group title, in characters.
pub const MAX_TITLE_LEN: usize = 200;
/// Longest accepted prompt, in characters.
pub const MAX_PROMPT_LEN: usize = 10_000;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a temperature is finite and within
/// [`MIN_TEMPERATURE`]..=[`MAX_TEMPERATURE`].
pub fn validate_temperature(temperature: f64) -> Result<(), CoreError> {
    if !temperature.is_finite() {
        return Err(CoreError::Validation(
            "temperature must be a finite number".to_string(),
        ));
    }
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(CoreError::Validation(format!(
            "temperature must be between {MIN_TEMPERATURE} and {MAX_TEMPERATURE}, got {temperature}"
        )));
    }
    Ok(())
}

/// Validate that a token budget is within
/// [`MIN_MAX_TOKENS`]..=[`MAX_MAX_TOKENS`].
pub fn validate_max_tokens(max_tokens: i64) -> Result<(), CoreError> {
    if !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&max_tokens) {
        return Err(CoreError::Validation(format!(
            "max_tokens must be between {MIN_MAX_TOKENS} and {MAX_MAX_TOKENS}, got {max_tokens}"
        )));
    }
    Ok(())
}

/// Validate a model identifier such as `openai/gpt-5`.
///
/// Identifiers are opaque to us; the only rules are non-empty and no
/// surrounding or embedded whitespace.
pub fn validate_model(model: &str) -> Result<(), CoreError> {
    if model.trim().is_empty() {
        return Err(CoreError::Validation("model is required".to_string()));
    }
    if model.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "model must not contain whitespace, got '{model}'"
        )));
    }
    Ok(())
}

/// Validate the required text fields of a group.
///
/// Both values are checked after trimming, so a title of `"   "` is
/// rejected the same way an empty one is.
pub fn validate_group_text(title: &str, prompt: &str) -> Result<(), CoreError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(CoreError::Validation("title is required".to_string()));
    }
    validate_prompt(prompt)?;
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a prompt (artwork description) on its own.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CoreError::Validation("prompt is required".to_string()));
    }
    if prompt.chars().count() > MAX_PROMPT_LEN {
        return Err(CoreError::Validation(format!(
            "prompt must be at most {MAX_PROMPT_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolve optional request parameters to concrete, validated values.
///
/// Missing values fall back to [`DEFAULT_TEMPERATURE`] and
/// [`DEFAULT_MAX_TOKENS`].
pub fn resolve_params(
    temperature: Option<f64>,
    max_tokens: Option<i64>,
) -> Result<(f64, i64), CoreError> {
    let temperature = temperature.unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    validate_temperature(temperature)?;
    validate_max_tokens(max_tokens)?;
    Ok((temperature, max_tokens))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- validate_temperature ------------------------------------------------

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert!(validate_temperature(MIN_TEMPERATURE).is_ok());
        assert!(validate_temperature(MAX_TEMPERATURE).is_ok());
        assert!(validate_temperature(DEFAULT_TEMPERATURE).is_ok());
    }

    #[test]
    fn rejects_temperature_out_of_range() {
        assert!(validate_temperature(-0.1).is_err());
        assert!(validate_temperature(2.01).is_err());
    }

    #[test]
    fn rejects_non_finite_temperature() {
        assert!(validate_temperature(f64::NAN).is_err());
        assert!(validate_temperature(f64::INFINITY).is_err());
    }

    // -- validate_max_tokens -------------------------------------------------

    #[test]
    fn max_tokens_bounds() {
        assert!(validate_max_tokens(1).is_ok());
        assert!(validate_max_tokens(MAX_MAX_TOKENS).is_ok());
        assert!(validate_max_tokens(0).is_err());
        assert!(validate_max_tokens(-5).is_err());
        assert!(validate_max_tokens(MAX_MAX_TOKENS + 1).is_err());
    }

    // -- validate_model ------------------------------------------------------

    #[test]
    fn model_must_be_present() {
        assert!(validate_model("openai/gpt-5").is_ok());
        assert!(validate_model("").is_err());
        assert!(validate_model("   ").is_err());
        assert!(validate_model("openai/ gpt-5").is_err());
    }

    // -- validate_group_text -------------------------------------------------

    #[test]
    fn group_text_requires_title_and_prompt() {
        assert!(validate_group_text("Sunflowers", "Sunflowers by Vincent van Gogh.").is_ok());
        assert!(validate_group_text("", "prompt").is_err());
        assert!(validate_group_text("title", "").is_err());
        assert!(validate_group_text("  ", "prompt").is_err());
    }

    #[test]
    fn group_title_length_is_capped() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        let err = validate_group_text(&long, "prompt").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn prompt_length_is_capped() {
        let long = "p".repeat(MAX_PROMPT_LEN + 1);
        assert!(validate_prompt(&long).is_err());
        assert!(validate_prompt(&"p".repeat(MAX_PROMPT_LEN)).is_ok());
        assert!(validate_prompt("  ").is_err());
    }

    // -- resolve_params ------------------------------------------------------

    #[test]
    fn resolve_params_fills_defaults() {
        let (t, m) = resolve_params(None, None).unwrap();
        assert_eq!(t, DEFAULT_TEMPERATURE);
        assert_eq!(m, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn resolve_params_validates_supplied_values() {
        assert_eq!(resolve_params(Some(1.2), Some(800)).unwrap(), (1.2, 800));
        assert!(resolve_params(Some(3.0), None).is_err());
        assert!(resolve_params(None, Some(0)).is_err());
    }
}

//! Prompt template configuration.
//!
//! A [`PromptConfig`] holds the fixed system messages sent ahead of every
//! generation request and the user message template. The template
//! contains [`DESCRIPTION_PLACEHOLDER`], which is replaced with the group's
//! prompt text.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Placeholder substituted with the artwork description in the user template.
pub const DESCRIPTION_PLACEHOLDER: &str = "{art_work_description}";

/// Built-in system prompt used when no configuration file is supplied.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert illustrator who draws exclusively \
in SVG. Reply with a single, complete, standalone <svg> element and nothing else: no prose, \
no explanations, no markdown. Use a viewBox, keep the markup valid, and prefer simple shapes, \
paths and gradients over embedded raster images.";

/// Built-in user template used when no configuration file is supplied.
pub const DEFAULT_USER_TEMPLATE: &str =
    "Create an SVG artwork of the following: {art_work_description}";

/// A fixed message sent before the user prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub role: String,
    pub content: String,
}

/// Prompt configuration loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub system_prompts: Vec<SystemPrompt>,
    pub user_prompt_template: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: "Built-in SVG illustration prompt".to_string(),
            system_prompts: vec![SystemPrompt {
                role: "system".to_string(),
                content: DEFAULT_SYSTEM_PROMPT.to_string(),
            }],
            user_prompt_template: DEFAULT_USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptConfig {
    /// Parse a configuration document in JSON form.
    ///
    /// The user template must contain [`DESCRIPTION_PLACEHOLDER`],
    /// otherwise every request would send the same text regardless of the
    /// group's prompt.
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let config: PromptConfig = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("invalid prompt config: {e}")))?;
        if !config.user_prompt_template.contains(DESCRIPTION_PLACEHOLDER) {
            return Err(CoreError::Validation(format!(
                "user_prompt_template must contain {DESCRIPTION_PLACEHOLDER}"
            )));
        }
        Ok(config)
    }

    /// Render the user message for a given description.
    pub fn render_user_prompt(&self, description: &str) -> String {
        format_user_prompt(&self.user_prompt_template, description)
    }
}

/// Replace every [`DESCRIPTION_PLACEHOLDER`] in `template` with `description`.
pub fn format_user_prompt(template: &str, description: &str) -> String {
    template.replace(DESCRIPTION_PLACEHOLDER, description)
}

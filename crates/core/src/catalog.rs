//! Model catalog ordering and pricing helpers.
//!
//! The live list comes from the provider's `/models` endpoint (see
//! `atelier_llm::catalog`); everything here is the pure post-processing
//! applied to it, plus a built-in fallback list.

use serde::{Deserialize, Serialize};

/// Provider meta-model that routes to an arbitrary backend. Never offered.
pub const AUTO_ROUTER_MODEL: &str = "openrouter/auto";

/// Models cheaper than this (USD per million output tokens) are pre-selected.
pub const DEFAULT_COST_CEILING: f64 = 0.20;

/// A selectable model with its output price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    /// USD per million output tokens.
    pub cost: f64,
    /// Whether the model is pre-selected in the workshop.
    #[serde(default)]
    pub checked: bool,
}

impl ModelInfo {
    pub fn new(id: &str, name: &str, cost: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cost,
            checked: false,
        }
    }
}

/// Convert a per-token price string (as the provider reports it) into a
/// per-million-token cost. Returns `None` for empty or unparsable input.
pub fn per_million_cost(per_token: &str) -> Option<f64> {
    let value: f64 = per_token.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value * 1_000_000.0)
}

/// Sort by cost (cheapest first, ties by id), drop the auto router and
/// mark the cheap models as pre-selected.
pub fn arrange(mut models: Vec<ModelInfo>) -> Vec<ModelInfo> {
    models.retain(|m| m.id != AUTO_ROUTER_MODEL);
    models.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.id.cmp(&b.id)));
    for model in &mut models {
        model.checked = model.cost < DEFAULT_COST_CEILING;
    }
    models
}

/// Ids of the pre-selected models in an arranged list.
pub fn default_model_ids(models: &[ModelInfo]) -> Vec<String> {
    models
        .iter()
        .filter(|m| m.checked)
        .map(|m| m.id.clone())
        .collect()
}

/// Human-readable name for a model id, or the id itself when unknown.
pub fn display_name<'a>(models: &'a [ModelInfo], id: &'a str) -> &'a str {
    models
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.as_str())
        .unwrap_or(id)
}

/// Built-in catalog used when the provider cannot be reached.
pub fn fallback_models() -> Vec<ModelInfo> {
    arrange(vec![
        ModelInfo::new("anthropic/claude-sonnet-4", "Anthropic: Claude Sonnet 4", 15.0),
        ModelInfo::new("openai/gpt-5", "OpenAI: GPT-5", 10.0),
        ModelInfo::new("google/gemini-2.5-pro", "Google: Gemini 2.5 Pro", 10.0),
        ModelInfo::new("google/gemini-2.5-flash", "Google: Gemini 2.5 Flash", 2.5),
        ModelInfo::new("openai/gpt-5-mini", "OpenAI: GPT-5 Mini", 2.0),
        ModelInfo::new("deepseek/deepseek-chat-v3.1", "DeepSeek: DeepSeek V3.1", 0.8),
        ModelInfo::new(
            "meta-llama/llama-3.3-70b-instruct",
            "Meta: Llama 3.3 70B Instruct",
            0.12,
        ),
    ])
}

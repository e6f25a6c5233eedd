//! HTTP client for the OpenRouter chat-completions endpoint.
//!
//! One generation is one `POST {base_url}/chat/completions` call. The
//! configured system prompts go first, then a single user message built
//! from the prompt template. No retries are attempted.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use atelier_core::prompt::PromptConfig;
use atelier_core::svg::{looks_like_svg, strip_code_fences};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Generation calls may take minutes for large token budgets.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Attribution headers expected by OpenRouter.
const REFERER: &str = "http://localhost:8080";
const APP_TITLE: &str = "SVG Art Gallery";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Optional reasoning hint for models that support it.
///
/// Only sent when supplied; unset fields are omitted from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub enabled: bool,
    /// `"low"`, `"medium"` or `"high"` for OpenAI-style models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<String>,
    /// Exclude reasoning tokens from the response.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exclude: bool,
}

/// Inputs to one generation call.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Description substituted into the user prompt template.
    pub prompt: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i64,
    pub reasoning: Option<Reasoning>,
}

/// Produces SVG markup from a prompt.
///
/// Handlers depend on this trait rather than on [`OpenRouterClient`]
/// directly; integration tests plug in a deterministic fake.
#[async_trait]
pub trait SvgGenerator: Send + Sync {
    async fn generate_svg(&self, params: &GenerationParams) -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<&'a Reasoning>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Chat-completions client bound to one API key and prompt configuration.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    prompt: PromptConfig,
}

impl OpenRouterClient {
    /// Create a client with its own connection pool and a 300 second timeout.
    ///
    /// * `api_key` - `None` or blank makes every call fail with
    ///   [`GenerationError::MissingApiKey`].
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`].
    pub fn new(api_key: Option<String>, base_url: String, prompt: PromptConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            prompt,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// System prompts in configured order, then the rendered user message.
    fn build_messages<'a>(&'a self, description: &str) -> Vec<ChatMessage<'a>> {
        let mut messages: Vec<ChatMessage<'a>> = self
            .prompt
            .system_prompts
            .iter()
            .map(|sp| ChatMessage {
                role: sp.role.as_str(),
                content: Cow::Borrowed(sp.content.as_str()),
            })
            .collect();
        messages.push(ChatMessage {
            role: "user",
            content: Cow::Owned(self.prompt.render_user_prompt(description)),
        });
        messages
    }
}

#[async_trait]
impl SvgGenerator for OpenRouterClient {
    async fn generate_svg(&self, params: &GenerationParams) -> Result<String, GenerationError> {
        let api_key = self.api_key().ok_or(GenerationError::MissingApiKey)?;

        let messages = self.build_messages(&params.prompt);
        tracing::info!(
            model = %params.model,
            messages = messages.len(),
            temperature = params.temperature,
            max_tokens = params.max_tokens,
            "Calling OpenRouter chat completions"
        );

        let request = ChatRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            reasoning: params.reasoning.as_ref(),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "OpenRouter responded");

        match parse_completion(status, &body) {
            Ok(svg) => {
                if !looks_like_svg(&svg) {
                    tracing::warn!(model = %params.model, "Generated content has no <svg> element");
                }
                tracing::info!(model = %params.model, chars = svg.len(), "Generation succeeded");
                Ok(svg)
            }
            Err(e) => {
                tracing::warn!(model = %params.model, error = %e, "Generation failed");
                Err(e)
            }
        }
    }
}

/// Interpret a chat-completions response.
///
/// Checked in order: status, JSON shape, embedded error object, choices.
/// On success returns the first choice's content with code fences
/// removed and whitespace trimmed. Content that is empty after that is
/// an error, never an empty SVG.
pub fn parse_completion(status: u16, body: &str) -> Result<String, GenerationError> {
    if status != 200 {
        return Err(GenerationError::Api {
            status,
            body: body.to_string(),
        });
    }

    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Decode {
            reason: e.to_string(),
            body: body.to_string(),
        })?;

    if let Some(error) = parsed.error {
        return Err(GenerationError::Remote {
            message: error.message,
        });
    }

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::NoChoices)?;

    let svg = strip_code_fences(choice.message.content.as_deref().unwrap_or_default());
    if svg.is_empty() {
        return Err(GenerationError::EmptyContent);
    }
    Ok(svg)
}

use std::path::Path;

use atelier_core::error::CoreError;
use atelier_core::prompt::PromptConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite connection URL (default: `sqlite://artworks.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `360`). Must exceed the
    /// 300 second generation timeout.
    pub request_timeout_secs: u64,
    /// Whether mutating endpoints and the workshop are reachable.
    pub editing_enabled: bool,
    /// Mutating requests allowed per client per minute (default: `100`).
    pub rate_limit_per_minute: usize,
    /// OpenRouter credential. Generation fails without it.
    pub openrouter_api_key: Option<String>,
    /// OpenRouter API root.
    pub openrouter_base_url: String,
    /// Prompt configuration file (JSON).
    pub prompt_config_path: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                        |
    /// |-------------------------|--------------------------------|
    /// | `HOST`                  | `0.0.0.0`                      |
    /// | `PORT`                  | `8080`                         |
    /// | `DATABASE_URL`          | `sqlite://artworks.db`         |
    /// | `CORS_ORIGINS`          | `http://localhost:8080`        |
    /// | `REQUEST_TIMEOUT_SECS`  | `360`                          |
    /// | `ENABLE_EDITING`        | `false` (`true` or `1` enable) |
    /// | `RATE_LIMIT_PER_MINUTE` | `100`                          |
    /// | `OPENROUTER_API_KEY`    | unset                          |
    /// | `OPENROUTER_BASE_URL`   | `https://openrouter.ai/api/v1` |
    /// | `PROMPT_CONFIG_PATH`    | `config/prompt.json`           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://artworks.db".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "360".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let editing_enabled = std::env::var("ENABLE_EDITING")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let rate_limit_per_minute: usize = std::env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("RATE_LIMIT_PER_MINUTE must be a valid usize");

        let openrouter_api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let openrouter_base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| atelier_llm::client::DEFAULT_BASE_URL.into());

        let prompt_config_path =
            std::env::var("PROMPT_CONFIG_PATH").unwrap_or_else(|_| "config/prompt.json".into());

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            editing_enabled,
            rate_limit_per_minute,
            openrouter_api_key,
            openrouter_base_url,
            prompt_config_path,
        }
    }
}

/// `ENABLE_EDITING` accepts exactly `true` or `1`; anything else is off.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim(), "true" | "1")
}

/// Load the prompt configuration from `path`.
///
/// A missing file yields the built-in default. An unreadable or invalid
/// file is an error so a typo does not silently change every prompt.
pub fn load_prompt_config(path: &Path) -> Result<PromptConfig, CoreError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let config = PromptConfig::from_json_str(&raw)?;
            tracing::info!(
                path = %path.display(),
                name = %config.name,
                system_prompts = config.system_prompts.len(),
                "Loaded prompt configuration"
            );
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Prompt config not found, using built-in default");
            Ok(PromptConfig::default())
        }
        Err(e) => Err(CoreError::Internal(format!(
            "failed to read prompt config {}: {e}",
            path.display()
        ))),
    }
}

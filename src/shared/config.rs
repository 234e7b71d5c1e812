//! Application configuration. Rewriting-service credentials, model, pool size.

use crate::domain::PromptIntent;
use serde::Deserialize;

pub use crate::adapters::ai::openai_adapter::DEFAULT_MAX_TOKENS;

/// OpenRouter chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
/// Per-unit calls allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bearer credential for the rewriting service. Read from PROMPTRX_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat completions URL. Defaults to OpenRouter. Read from PROMPTRX_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Default model identifier. Read from PROMPTRX_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Completion budget per call. Read from PROMPTRX_MAX_TOKENS.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Worker pool size for per-unit calls. Read from PROMPTRX_CONCURRENCY.
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Whole-request timeout in seconds. Read from PROMPTRX_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Simplification intent name. Read from PROMPTRX_INTENT.
    #[serde(default)]
    pub intent: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PROMPTRX").try_parsing(true));
        if let Ok(path) = std::env::var("PROMPTRX_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the API key if configured and non-blank.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("PROMPTRX_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn max_tokens_or_default(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    /// Pool size, never below 1.
    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1)
    }

    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Configured intent; unknown or missing names resolve to the default.
    pub fn intent(&self) -> PromptIntent {
        self.intent
            .as_deref()
            .map(PromptIntent::from_name)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_url_or_default(), DEFAULT_API_URL);
        assert_eq!(cfg.model_or_default(), "openai/gpt-4o-mini");
        assert_eq!(cfg.max_tokens_or_default(), 400);
        assert_eq!(cfg.concurrency_or_default(), DEFAULT_CONCURRENCY);
        assert_eq!(cfg.intent(), PromptIntent::InstructionSimplification);
    }

    #[test]
    fn test_overrides_and_clamping() {
        let cfg = AppConfig {
            api_key: Some("  ".into()),
            concurrency: Some(0),
            intent: Some("warning_highlight".into()),
            model: Some("anthropic/claude-3-haiku".into()),
            ..Default::default()
        };
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.concurrency_or_default(), 1);
        assert_eq!(cfg.intent(), PromptIntent::WarningHighlight);
        assert_eq!(cfg.model_or_default(), "anthropic/claude-3-haiku");

        let cfg = AppConfig {
            api_key: Some("sk-test".into()),
            ..Default::default()
        };
        assert_eq!(cfg.api_key().as_deref(), Some("sk-test"));
    }
}

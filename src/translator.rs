use crate::config::{Config, Provider};
use crate::types::{PipelineError, Result, TranslationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const MAX_TOKENS: u32 = 1024;

fn build_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following English text to {}. Please only provide the translated text.\n\nText: {}",
        target_language, text
    )
}

/// Trait for translation backends. Implementations report raw failures;
/// degradation policy lives in [`translate_field`].
#[async_trait]
pub trait Translator: Send + Sync {
    /// Name of this backend, for logs.
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`.
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> std::result::Result<String, TranslationError>;
}

/// Port boundary for a single field. Empty input returns empty without a
/// provider call; success is trimmed; any failure degrades to an inline
/// sentinel so one bad translation never aborts the batch.
pub async fn translate_field(
    translator: &dyn Translator,
    text: &str,
    target_language: &str,
) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    match translator.translate(text, target_language).await {
        Ok(translated) => translated.trim().to_string(),
        Err(e) => {
            warn!("Translation via {} failed: {}", translator.name(), e);
            format!("[translation error: {}]", e)
        }
    }
}

/// Build the configured backend. A missing API key is a startup
/// configuration error, not a per-call failure.
pub fn from_config(config: &Config) -> Result<Arc<dyn Translator>> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    match config.provider {
        Provider::None => Ok(Arc::new(NoopTranslator)),
        Provider::Openai => {
            let api_key = require_env("OPENAI_API_KEY")?;
            Ok(Arc::new(OpenAiTranslator::new(
                api_key,
                config.model.clone(),
                timeout,
            )?))
        }
        Provider::Anthropic => {
            let api_key = require_env("ANTHROPIC_API_KEY")?;
            Ok(Arc::new(AnthropicTranslator::new(
                api_key,
                config.model.clone(),
                timeout,
            )?))
        }
    }
}

fn require_env(var: &str) -> Result<String> {
    env::var(var).map_err(|_| {
        PipelineError::Config(format!(
            "{} not set; required for the selected translation provider",
            var
        ))
    })
}

/// Passthrough backend for the no-translation variant.
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    fn name(&self) -> &str {
        "noop"
    }

    async fn translate(
        &self,
        text: &str,
        _target_language: &str,
    ) -> std::result::Result<String, TranslationError> {
        Ok(text.to_string())
    }
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenAiTranslator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: String, model: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> std::result::Result<String, TranslationError> {
        debug!("Translating {} chars via {}", text.len(), self.model);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(text, target_language),
            }],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TranslationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(TranslationError::EmptyResponse)
    }
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

pub struct AnthropicTranslator {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl AnthropicTranslator {
    pub fn new(api_key: String, model: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            url: ANTHROPIC_URL.to_string(),
            model: model.unwrap_or_else(|| ANTHROPIC_DEFAULT_MODEL.to_string()),
        })
    }

    pub fn with_url(mut self, url: String) -> Self {
        self.url = url;
        self
    }
}

#[async_trait]
impl Translator for AnthropicTranslator {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> std::result::Result<String, TranslationError> {
        debug!("Translating {} chars via {}", text.len(), self.model);

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(text, target_language),
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TranslationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(TranslationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTranslator {
        calls: AtomicUsize,
    }

    impl CountingTranslator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Translator for CountingTranslator {
        fn name(&self) -> &str {
            "counting"
        }

        async fn translate(
            &self,
            text: &str,
            _target_language: &str,
        ) -> std::result::Result<String, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("  {}  ", text.to_uppercase()))
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn translate(
            &self,
            _text: &str,
            _target_language: &str,
        ) -> std::result::Result<String, TranslationError> {
            Err(TranslationError::Provider {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn empty_input_skips_the_provider() {
        let translator = CountingTranslator::new();
        let result = translate_field(&translator, "", "Japanese").await;
        assert_eq!(result, "");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);

        let result = translate_field(&translator, "   \n ", "Japanese").await;
        assert_eq!(result, "");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_is_trimmed() {
        let translator = CountingTranslator::new();
        let result = translate_field(&translator, "hello", "Japanese").await;
        assert_eq!(result, "HELLO");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_becomes_a_sentinel() {
        let result = translate_field(&FailingTranslator, "hello", "Japanese").await;
        assert!(result.starts_with("[translation error:"));
        assert!(result.ends_with(']'));
        assert!(result.contains("500"));
    }

    #[tokio::test]
    async fn noop_passes_text_through() {
        let result = translate_field(&NoopTranslator, "unchanged", "Japanese").await;
        assert_eq!(result, "unchanged");
    }

    #[test]
    fn prompt_carries_language_and_text() {
        let prompt = build_prompt("Hello world", "Japanese");
        assert!(prompt.starts_with("Translate the following English text to Japanese."));
        assert!(prompt.ends_with("Text: Hello world"));
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        use clap::Parser;

        env::remove_var("OPENAI_API_KEY");
        let config = Config::parse_from(["rss-translator", "--provider", "openai"]);
        let result = from_config(&config);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    fn openai_against(server: &mockito::Server) -> OpenAiTranslator {
        OpenAiTranslator::new("test-key".to_string(), None, Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.url())
    }

    #[tokio::test]
    async fn openai_backend_parses_chat_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"こんにちは世界"}}]}"#)
            .create_async()
            .await;

        let translator = openai_against(&server);
        let result = translator.translate("Hello world", "Japanese").await.unwrap();
        assert_eq!(result, "こんにちは世界");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn openai_backend_maps_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let translator = openai_against(&server);
        let result = translator.translate("Hello", "Japanese").await;

        match result {
            Err(TranslationError::Provider { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected provider error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn openai_backend_rejects_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let translator = openai_against(&server);
        let result = translator.translate("Hello", "Japanese").await;
        assert!(matches!(result, Err(TranslationError::InvalidBody(_))));
    }

    #[tokio::test]
    async fn anthropic_backend_parses_messages_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"こんにちは世界"}]}"#)
            .create_async()
            .await;

        let translator =
            AnthropicTranslator::new("test-key".to_string(), None, Duration::from_secs(5))
                .unwrap()
                .with_url(format!("{}/v1/messages", server.url()));

        let result = translator.translate("Hello world", "Japanese").await.unwrap();
        assert_eq!(result, "こんにちは世界");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn anthropic_backend_maps_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let translator =
            AnthropicTranslator::new("test-key".to_string(), None, Duration::from_secs(5))
                .unwrap()
                .with_url(format!("{}/v1/messages", server.url()));

        let result = translator.translate("Hello", "Japanese").await;
        assert!(matches!(
            result,
            Err(TranslationError::Provider { status: 401, .. })
        ));
    }
}

/// LLM Gateway — the single point of entry for all hosted-model calls.
///
/// ARCHITECTURAL RULE: No other module may call the Mistral API directly.
/// All LLM interactions MUST go through the `CompletionGateway` trait.
///
/// Model: mistral-large-latest (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MISTRAL_API_URL: &str = "https://api.mistral.ai";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "mistral-large-latest";
/// Request-level timeout. Expiry surfaces as a `GatewayError` (via reqwest).
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The gateway trait. The analysis pipeline depends on this, not on the
/// concrete client, so tests can run against canned completions.
///
/// Carried in `AppState` as `Arc<dyn CompletionGateway>`.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends one fully-rendered prompt and returns the raw text completion.
    /// Single attempt — any failure aborts the caller's current phase.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Production gateway backed by the Mistral chat-completions API.
#[derive(Clone)]
pub struct MistralClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MistralClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, MISTRAL_API_URL.to_string())
    }

    /// Constructor with an explicit base URL, used by tests against a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl CompletionGateway for MistralClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the API's error message, falling back to the raw body
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GatewayError::EmptyContent)?;

        if content.is_empty() {
            return Err(GatewayError::EmptyContent);
        }

        Ok(content)
    }
}

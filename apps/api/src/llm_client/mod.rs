/// LLM Client: the single point of entry for chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion provider directly.
/// Handlers depend on the `CompletionProvider` trait; `LlmClient` is the HTTP implementation.
///
/// Generation parameters are fixed here and never taken from callers.
/// Each call is a single attempt: no retry, no backoff, no client-side timeout.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::message::Message;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for every generation.
pub const MODEL: &str = "gpt-3.5-turbo";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;
const PRESENCE_PENALTY: f64 = 0.0;
const FREQUENCY_PENALTY: f64 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can turn a message sequence into a completion.
/// `Ok(None)` means the provider answered but carried no content.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<Option<String>, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
    presence_penalty: f64,
    frequency_penalty: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Providers may send `null` here; it reads the same as an empty list.
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Content of the first choice. Blank content counts as missing.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .as_deref()
            .and_then(|choices| choices.first())
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Makes one call to the chat-completion endpoint and returns the full response.
    pub async fn call(&self, messages: &[Message]) -> Result<ChatCompletionResponse, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Completion provider returned {}", status);
            let message = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.error.message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<Option<String>, LlmError> {
        let response = self.call(messages).await?;
        Ok(response.text().map(str::to_string))
    }
}

/// LLM Client — the single point of entry for all chat-completion calls in CopyForge.
///
/// ARCHITECTURAL RULE: No other module may call the inference endpoint directly.
/// All LLM interactions MUST go through this module.
///
/// The endpoint speaks the OpenAI-compatible chat completions protocol. Calls are
/// made exactly once: there is no retry and no backoff. The user re-runs the
/// command to regenerate.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API returned no completion (status {status})")]
    MissingCompletion { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A chat message. Text-only messages serialize `content` as a string; vision
/// messages serialize it as an array of typed parts.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// HTTP status the response arrived with.
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
}

impl ChatResponse {
    /// Extracts the text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Sampling parameters for a single call.
#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the endpoint to constrain output to a single JSON object.
    pub json_mode: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services in CopyForge.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    text_model: String,
    vision_model: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        api_url: String,
        text_model: String,
        vision_model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_url,
            api_key,
            text_model,
            vision_model,
        })
    }

    /// Builds a client from config. Returns `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        Self::new(
            api_key,
            config.api_url.clone(),
            config.text_model.clone(),
            config.vision_model.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
        .map(Some)
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    /// Makes a single call to the completion endpoint and returns the full response.
    pub async fn call(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: CallOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(model, messages = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut chat_response: ChatResponse = response.json().await?;
        chat_response.status = status.as_u16();

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, completion_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }

    /// Calls the endpoint and returns the first completion's text verbatim.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: CallOptions,
    ) -> Result<String, LlmError> {
        let response = self.call(model, messages, options).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::MissingCompletion {
                status: response.status,
            })
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

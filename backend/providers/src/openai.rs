//! OpenAI-compatible chat-completions calls.

use serde::{Deserialize, Serialize};
use tracing::info;

use reelscope_config::ProviderConfig;
use reelscope_core::ReelError;

const PROVIDER: &str = "openai";

/// Token ceiling sized for long-form Chinese script output.
pub const MAX_COMPLETION_TOKENS: u32 = 16_384;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One element of a multi-part user message.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImagePayload },
}

#[derive(Serialize)]
pub struct ImagePayload {
    pub url: String,
    /// Always "low": bounds the per-image token cost for mass frame uploads.
    pub detail: &'static str,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn low_detail_image(data_uri: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImagePayload {
                url: data_uri.into(),
                detail: "low",
            },
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Post a chat completion and return the reply text.
pub async fn chat(
    client: &reqwest::Client,
    config: &ProviderConfig,
    messages: Vec<ChatMessage>,
    temperature: f32,
) -> Result<String, ReelError> {
    let api_key = config.resolve_api_key()?;
    let url = config.openai_chat_url();

    let body = ChatRequest {
        model: config.effective_model().to_string(),
        messages,
        max_tokens: MAX_COMPLETION_TOKENS,
        temperature,
    };

    info!(model = %body.model, url = %url, "calling chat completions");

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| ReelError::provider(PROVIDER, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ReelError::provider_status(PROVIDER, status.as_u16(), body));
    }

    let reply: ChatResponse = response
        .json()
        .await
        .map_err(|e| ReelError::provider(PROVIDER, format!("unreadable response body: {e}")))?;

    Ok(reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

//! High-level pipeline operations, one per user action.

use tracing::info;

use reelscope_config::ProviderConfig;
use reelscope_core::{AnalysisResult, ProviderKind, ReelError, SopResult};

use crate::caller::{analyzer_for, VideoSource};
use crate::extract::parse_reply;
use crate::gemini;
use crate::openai::{self, ChatMessage};
use crate::prompt;

/// Analyze an uploaded video with whichever strategy the config selects.
pub async fn analyze_video(
    config: &ProviderConfig,
    video: &VideoSource,
) -> Result<AnalysisResult, ReelError> {
    analyzer_for(config).analyze(video).await
}

/// Extract reusable script material from a remote video URL.
///
/// On the Gemini path the call is search-augmented so the model can actually
/// look at the page; OpenAI-compatible endpoints get a plain chat call.
pub async fn extract_url_content(
    config: &ProviderConfig,
    video_url: &str,
) -> Result<String, ReelError> {
    if video_url.trim().is_empty() {
        return Err(ReelError::EmptyInput("video url".to_string()));
    }
    let prompt_text = prompt::url_extraction_prompt(video_url.trim());
    call_text_model(config, &prompt_text, true).await
}

/// Generate the 8-step SOP script for a niche/topic, using extracted material
/// as context when available.
pub async fn generate_sop_script(
    config: &ProviderConfig,
    niche: &str,
    topic: &str,
    context: &str,
) -> Result<SopResult, ReelError> {
    if niche.trim().is_empty() {
        return Err(ReelError::EmptyInput("niche".to_string()));
    }
    if topic.trim().is_empty() {
        return Err(ReelError::EmptyInput("topic".to_string()));
    }

    let prompt_text = prompt::sop_prompt(niche.trim(), topic.trim(), context);
    let raw = call_text_model(config, &prompt_text, false).await?;
    parse_reply(&raw)
}

/// Route a plain text prompt to the configured provider.
async fn call_text_model(
    config: &ProviderConfig,
    prompt_text: &str,
    use_search: bool,
) -> Result<String, ReelError> {
    // Fail on a missing credential before building any request.
    config.resolve_api_key()?;
    info!(provider = config.provider.as_str(), "dispatching text call");

    let client = reqwest::Client::new();
    match config.provider {
        ProviderKind::Gemini => {
            let parts = vec![gemini::text_part(prompt_text)];
            gemini::generate_content(&client, config, parts, use_search, false).await
        }
        ProviderKind::OpenAiCompatible => {
            let messages = vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user_text(prompt_text),
            ];
            openai::chat(&client, config, messages, 0.7).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless(provider: ProviderKind) -> ProviderConfig {
        ProviderConfig {
            provider,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn url_extraction_rejects_missing_credential() {
        for provider in [ProviderKind::Gemini, ProviderKind::OpenAiCompatible] {
            let err = extract_url_content(&keyless(provider), "https://example.com/v/1")
                .await
                .unwrap_err();
            assert!(matches!(err, ReelError::MissingApiKey));
        }
    }

    #[tokio::test]
    async fn url_extraction_rejects_empty_url() {
        let config = ProviderConfig {
            user_api_key: "k".to_string(),
            ..Default::default()
        };
        let err = extract_url_content(&config, "   ").await.unwrap_err();
        assert!(matches!(err, ReelError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn sop_generation_rejects_missing_credential() {
        for provider in [ProviderKind::Gemini, ProviderKind::OpenAiCompatible] {
            let err = generate_sop_script(&keyless(provider), "猫咖", "避坑指南", "")
                .await
                .unwrap_err();
            assert!(matches!(err, ReelError::MissingApiKey));
        }
    }

    #[tokio::test]
    async fn sop_generation_requires_niche_and_topic() {
        let config = ProviderConfig {
            user_api_key: "k".to_string(),
            ..Default::default()
        };
        let err = generate_sop_script(&config, "", "标题", "").await.unwrap_err();
        assert!(matches!(err, ReelError::EmptyInput(ref field) if field == "niche"));

        let err = generate_sop_script(&config, "赛道", " ", "").await.unwrap_err();
        assert!(matches!(err, ReelError::EmptyInput(ref field) if field == "topic"));
    }
}

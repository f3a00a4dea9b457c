//! Gemini generateContent calls.
//!
//! One low-level entry point: a parts list in, the first candidate's text
//! out. Video analysis sends the encoded video inline and pins the response
//! MIME type to JSON; URL extraction enables the google-search tool instead.

use serde_json::{json, Value};
use tracing::info;

use reelscope_config::ProviderConfig;
use reelscope_core::ReelError;

const PROVIDER: &str = "gemini";

/// A text part.
pub fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

/// An inline-data part carrying base64 video bytes.
pub fn inline_data_part(mime_type: &str, base64_data: &str) -> Value {
    json!({ "inlineData": { "mimeType": mime_type, "data": base64_data } })
}

/// Call generateContent and return the reply text.
pub async fn generate_content(
    client: &reqwest::Client,
    config: &ProviderConfig,
    parts: Vec<Value>,
    use_search: bool,
    force_json: bool,
) -> Result<String, ReelError> {
    let api_key = config.resolve_api_key()?;
    let url = config.gemini_generate_url(api_key);

    let mut body = json!({ "contents": [{ "parts": parts }] });
    if use_search {
        body["tools"] = json!([{ "googleSearch": {} }]);
    }
    if force_json {
        body["generationConfig"] = json!({ "responseMimeType": "application/json" });
    }

    info!(model = config.effective_model(), use_search, "calling Gemini generateContent");

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| ReelError::provider(PROVIDER, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ReelError::provider_status(PROVIDER, status.as_u16(), body));
    }

    let reply: Value = response
        .json()
        .await
        .map_err(|e| ReelError::provider(PROVIDER, format!("unreadable response body: {e}")))?;

    Ok(reply["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_have_the_wire_shape() {
        let part = inline_data_part("video/mp4", "AAAA");
        assert_eq!(part["inlineData"]["mimeType"], "video/mp4");
        assert_eq!(part["inlineData"]["data"], "AAAA");

        let part = text_part("分析这个视频");
        assert_eq!(part["text"], "分析这个视频");
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_network_call() {
        let config = ProviderConfig::default();
        let client = reqwest::Client::new();
        let err = generate_content(&client, &config, vec![text_part("hi")], false, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::MissingApiKey));
    }
}

//! The two video-calling strategies behind one interface.
//!
//! `NativeMultimodalCaller` ships the encoded video straight to Gemini.
//! `FrameSamplingCaller` decodes the video locally into a bounded frame
//! sequence and sends one low-detail image part per frame to an
//! OpenAI-compatible endpoint. The factory picks one from the provider kind.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use reelscope_config::ProviderConfig;
use reelscope_core::{AnalysisResult, ProviderKind, ReelError, VideoPayload};
use reelscope_sampler::{encode_file, sample_frames, FfmpegDecoder, VideoDecoder};

use crate::extract::parse_reply;
use crate::gemini;
use crate::openai::{self, ChatMessage, ContentPart};
use crate::prompt;

/// A video file, optionally with its bytes already base64-encoded.
///
/// Only the native path sends the encoded bytes; when the payload is absent
/// it encodes from the path on demand. The frame-sampling path reads the
/// file through its decoder and never needs the payload.
#[derive(Debug, Clone)]
pub struct VideoSource {
    pub path: PathBuf,
    pub payload: Option<VideoPayload>,
}

impl VideoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            payload: None,
        }
    }

    pub fn with_payload(path: impl Into<PathBuf>, payload: VideoPayload) -> Self {
        Self {
            path: path.into(),
            payload: Some(payload),
        }
    }
}

/// One strategy for turning a video into a structured analysis.
#[async_trait]
pub trait VideoAnalyzer: Send + Sync {
    async fn analyze(&self, video: &VideoSource) -> Result<AnalysisResult, ReelError>;
}

/// Pick the calling strategy for the configured provider.
pub fn analyzer_for(config: &ProviderConfig) -> Box<dyn VideoAnalyzer> {
    match config.provider {
        ProviderKind::Gemini => Box::new(NativeMultimodalCaller::new(config.clone())),
        ProviderKind::OpenAiCompatible => Box::new(FrameSamplingCaller::new(
            config.clone(),
            Arc::new(FfmpegDecoder::new()),
        )),
    }
}

/// Sends the video bytes inline to Gemini's multimodal endpoint.
pub struct NativeMultimodalCaller {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl NativeMultimodalCaller {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VideoAnalyzer for NativeMultimodalCaller {
    async fn analyze(&self, video: &VideoSource) -> Result<AnalysisResult, ReelError> {
        // Credential check first, before paying for a potentially huge encode.
        self.config.resolve_api_key()?;

        let payload = match &video.payload {
            Some(payload) => payload.clone(),
            None => encode_file(&video.path, |_| {}).await?,
        };
        let parts = vec![
            gemini::inline_data_part(&payload.mime_type, &payload.base64),
            gemini::text_part(&prompt::video_analysis_prompt()),
        ];
        let text =
            gemini::generate_content(&self.client, &self.config, parts, false, true).await?;
        // An empty candidate list reads as an empty document, not a crash.
        let text = if text.trim().is_empty() {
            "{}".to_string()
        } else {
            text
        };
        parse_reply(&text)
    }
}

/// Samples frames locally and sends them as low-detail image parts.
pub struct FrameSamplingCaller {
    config: ProviderConfig,
    client: reqwest::Client,
    decoder: Arc<dyn VideoDecoder>,
}

impl FrameSamplingCaller {
    pub fn new(config: ProviderConfig, decoder: Arc<dyn VideoDecoder>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            decoder,
        }
    }
}

#[async_trait]
impl VideoAnalyzer for FrameSamplingCaller {
    async fn analyze(&self, video: &VideoSource) -> Result<AnalysisResult, ReelError> {
        // Credential check comes first: no point decoding an hour of video
        // just to fail on a missing key.
        self.config.resolve_api_key()?;

        let frames = sample_frames(self.decoder.as_ref(), &video.path).await?;
        info!(frames = frames.len(), "sending sampled frames for analysis");

        let mut parts = Vec::with_capacity(frames.len() + 1);
        parts.push(ContentPart::text(prompt::video_analysis_prompt()));
        for frame in &frames {
            parts.push(ContentPart::low_detail_image(frame.image_data_uri.clone()));
        }

        let messages = vec![
            ChatMessage::system(prompt::SYSTEM_PROMPT_JSON),
            ChatMessage::user_parts(parts),
        ];
        let text = openai::chat(&self.client, &self.config, messages, 0.2).await?;
        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct PanickingDecoder;

    #[async_trait]
    impl VideoDecoder for PanickingDecoder {
        async fn probe_duration(&self, _source: &std::path::Path) -> Result<f64, ReelError> {
            panic!("decoder must not run without a credential");
        }

        async fn decode_frame_at(
            &self,
            _source: &std::path::Path,
            _timestamp: f64,
            _timeout: Duration,
        ) -> Result<Option<image::DynamicImage>, ReelError> {
            panic!("decoder must not run without a credential");
        }
    }

    fn source() -> VideoSource {
        VideoSource::with_payload(
            "clip.mp4",
            VideoPayload {
                base64: "AAAA".to_string(),
                mime_type: "video/mp4".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn native_caller_rejects_missing_credential() {
        let caller = NativeMultimodalCaller::new(ProviderConfig::default());
        let err = caller.analyze(&source()).await.unwrap_err();
        assert!(matches!(err, ReelError::MissingApiKey));
    }

    #[tokio::test]
    async fn native_caller_encodes_from_path_when_payload_absent() {
        let config = ProviderConfig {
            user_api_key: "k".to_string(),
            ..Default::default()
        };
        let caller = NativeMultimodalCaller::new(config);
        let err = caller
            .analyze(&VideoSource::new("/nonexistent/clip.mp4"))
            .await
            .unwrap_err();
        // The lazy encode runs (and fails on the missing file) before any call.
        assert!(matches!(err, ReelError::Decode(_)));
    }

    #[tokio::test]
    async fn frame_sampling_caller_needs_no_encoded_payload() {
        let config = ProviderConfig {
            provider: ProviderKind::OpenAiCompatible,
            ..Default::default()
        };
        let caller = FrameSamplingCaller::new(config, Arc::new(PanickingDecoder));
        // Path-only source: the credential check still comes before decoding.
        let err = caller
            .analyze(&VideoSource::new("clip.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReelError::MissingApiKey));
    }

    #[test]
    fn factory_dispatches_on_provider_kind() {
        let gemini = analyzer_for(&ProviderConfig::default());
        let openai = analyzer_for(&ProviderConfig {
            provider: ProviderKind::OpenAiCompatible,
            ..Default::default()
        });
        // Both satisfy the same contract; smoke-check they were constructed.
        let _: &dyn VideoAnalyzer = gemini.as_ref();
        let _: &dyn VideoAnalyzer = openai.as_ref();
    }
}

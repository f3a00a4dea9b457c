//! Video decoding seam.
//!
//! The sampler only needs two operations: the stream duration and "the frame
//! nearest this timestamp". The production implementation shells out to
//! ffprobe/ffmpeg; tests run against a synthetic decoder.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use tokio::process::Command;
use tracing::debug;

use reelscope_core::ReelError;

#[async_trait]
pub trait VideoDecoder: Send + Sync {
    /// Duration of the video in seconds.
    async fn probe_duration(&self, source: &Path) -> Result<f64, ReelError>;

    /// Decode the frame nearest `timestamp`.
    ///
    /// Returns `Ok(None)` when the seek misses the deadline — the caller
    /// degrades to a stale frame rather than failing the pipeline.
    async fn decode_frame_at(
        &self,
        source: &Path,
        timestamp: f64,
        timeout: Duration,
    ) -> Result<Option<DynamicImage>, ReelError>;
}

/// Decoder backed by the ffmpeg/ffprobe binaries on PATH.
pub struct FfmpegDecoder {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegDecoder {
    pub fn new() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }

    pub fn with_binaries(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoDecoder for FfmpegDecoder {
    async fn probe_duration(&self, source: &Path) -> Result<f64, ReelError> {
        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(source)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ReelError::Decode(format!("ffprobe failed to start: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::Decode(format!(
                "ffprobe failed on {}: {}",
                source.display(),
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        text.trim()
            .parse::<f64>()
            .map_err(|e| ReelError::Decode(format!("unparseable duration {text:?}: {e}")))
    }

    async fn decode_frame_at(
        &self,
        source: &Path,
        timestamp: f64,
        timeout: Duration,
    ) -> Result<Option<DynamicImage>, ReelError> {
        let mut command = Command::new(&self.ffmpeg);
        command
            .args(["-v", "error", "-ss", &format!("{timestamp:.3}")])
            .arg("-i")
            .arg(source)
            .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A dropped future (timeout) must not leave a decoder running.
            .kill_on_drop(true);

        let result = tokio::time::timeout(timeout, command.output()).await;
        let output = match result {
            Ok(output) => {
                output.map_err(|e| ReelError::Decode(format!("ffmpeg failed to start: {e}")))?
            }
            Err(_) => {
                debug!(timestamp, "frame seek timed out");
                return Ok(None);
            }
        };

        if !output.status.success() || output.stdout.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReelError::Decode(format!(
                "ffmpeg seek to {timestamp:.3}s failed: {}",
                stderr.trim()
            )));
        }

        let image = image::load_from_memory(&output.stdout)
            .map_err(|e| ReelError::Decode(format!("decoded frame is not an image: {e}")))?;
        Ok(Some(image))
    }
}

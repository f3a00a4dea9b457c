//! Time-uniform frame sampling for the frame-sampling call path.
//!
//! Roughly one frame per second of video, capped at 3600 frames, each
//! downscaled and JPEG-compressed into a data URI. The cap and the
//! resolution/quality policy bound the request payload for hour-long
//! inputs; they are a bandwidth control, not an accuracy knob.

use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};
use tracing::{debug, info};

use reelscope_core::{ReelError, SampledFrame, LONG_VIDEO_FRAME_THRESHOLD, MAX_SAMPLED_FRAMES};

use crate::decoder::VideoDecoder;

/// Per-seek deadline; a miss degrades to a stale frame.
pub const SEEK_TIMEOUT: Duration = Duration::from_millis(500);

/// Downscale/compression policy for one sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePolicy {
    /// Cap on the longest raster dimension, in pixels.
    pub max_dimension: u32,
    /// JPEG quality, 0-100.
    pub jpeg_quality: u8,
}

impl SamplePolicy {
    /// Videos past the 5-minute mark get smaller, rougher frames so the
    /// request body stays bounded.
    pub fn for_count(count: usize) -> Self {
        if count > LONG_VIDEO_FRAME_THRESHOLD {
            Self {
                max_dimension: 320,
                jpeg_quality: 30,
            }
        } else {
            Self {
                max_dimension: 512,
                jpeg_quality: 50,
            }
        }
    }
}

/// `min(ceil(duration), 3600)`, with non-positive durations treated as one second.
pub fn frame_count(duration_seconds: f64) -> usize {
    let duration = if duration_seconds.is_finite() && duration_seconds > 0.0 {
        duration_seconds
    } else {
        1.0
    };
    (duration.ceil() as usize).min(MAX_SAMPLED_FRAMES)
}

/// Sample a bounded, time-uniform frame sequence from a video.
///
/// Frames land at `i * duration/count`; a timed-out seek reuses the previous
/// frame (visually stale) instead of aborting the run. A timeout before any
/// frame decoded emits a blank frame, matching an unpainted canvas.
pub async fn sample_frames(
    decoder: &dyn VideoDecoder,
    source: &Path,
) -> Result<Vec<SampledFrame>, ReelError> {
    let probed = decoder.probe_duration(source).await?;
    let duration = if probed.is_finite() && probed > 0.0 {
        probed
    } else {
        1.0
    };
    let count = frame_count(duration);
    let policy = SamplePolicy::for_count(count);
    info!(
        duration_seconds = duration,
        frames = count,
        max_dimension = policy.max_dimension,
        "sampling video frames"
    );

    let mut frames = Vec::with_capacity(count);
    let mut current: Option<DynamicImage> = None;

    for i in 0..count {
        let timestamp = duration / count as f64 * i as f64;
        match decoder.decode_frame_at(source, timestamp, SEEK_TIMEOUT).await? {
            Some(image) => current = Some(image),
            None => debug!(timestamp, "seek timed out, keeping previous frame"),
        }
        let image = match current.as_ref() {
            Some(image) => encode_frame(image, policy)?,
            // Nothing decoded yet: an unpainted surface.
            None => encode_frame(&blank_frame(), policy)?,
        };
        frames.push(SampledFrame {
            timestamp_seconds: timestamp,
            image_data_uri: image,
        });
    }

    Ok(frames)
}

fn blank_frame() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(16, 16))
}

/// Downscale to the policy cap and encode as a JPEG data URI.
fn encode_frame(image: &DynamicImage, policy: SamplePolicy) -> Result<String, ReelError> {
    let (width, height) = image.dimensions();
    let scaled;
    let frame = if width.max(height) > policy.max_dimension {
        scaled = image.resize(
            policy.max_dimension,
            policy.max_dimension,
            FilterType::Triangle,
        );
        &scaled
    } else {
        image
    };

    let rgb = frame.to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, policy.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|e| ReelError::Decode(format!("jpeg encode failed: {e}")))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeDecoder {
        duration: f64,
        width: u32,
        height: u32,
        /// Seek indices that miss the deadline.
        timeouts: HashSet<usize>,
        seeks: AtomicUsize,
    }

    impl FakeDecoder {
        fn new(duration: f64, width: u32, height: u32) -> Self {
            Self {
                duration,
                width,
                height,
                timeouts: HashSet::new(),
                seeks: AtomicUsize::new(0),
            }
        }

        fn with_timeouts(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
            self.timeouts = indices.into_iter().collect();
            self
        }
    }

    #[async_trait]
    impl VideoDecoder for FakeDecoder {
        async fn probe_duration(&self, _source: &Path) -> Result<f64, ReelError> {
            Ok(self.duration)
        }

        async fn decode_frame_at(
            &self,
            _source: &Path,
            _timestamp: f64,
            _timeout: Duration,
        ) -> Result<Option<DynamicImage>, ReelError> {
            let index = self.seeks.fetch_add(1, Ordering::SeqCst);
            if self.timeouts.contains(&index) {
                return Ok(None);
            }
            // Shade varies per seek so stale frames are distinguishable.
            let shade = (index % 251) as u8;
            let mut buffer = RgbImage::new(self.width, self.height);
            for pixel in buffer.pixels_mut() {
                pixel.0 = [shade, shade, shade];
            }
            Ok(Some(DynamicImage::ImageRgb8(buffer)))
        }
    }

    fn decoded_dimensions(frame: &SampledFrame) -> (u32, u32) {
        let b64 = frame
            .image_data_uri
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data URI prefix");
        let bytes = STANDARD.decode(b64).unwrap();
        let image = image::load_from_memory(&bytes).unwrap();
        image.dimensions()
    }

    #[test]
    fn frame_count_follows_ceil_and_cap() {
        assert_eq!(frame_count(10.0), 10);
        assert_eq!(frame_count(10.2), 11);
        assert_eq!(frame_count(0.4), 1);
        assert_eq!(frame_count(0.0), 1);
        assert_eq!(frame_count(f64::NAN), 1);
        assert_eq!(frame_count(3600.0), 3600);
        assert_eq!(frame_count(7200.0), 3600);
    }

    #[test]
    fn policy_switches_at_five_minutes() {
        assert_eq!(
            SamplePolicy::for_count(300),
            SamplePolicy {
                max_dimension: 512,
                jpeg_quality: 50
            }
        );
        assert_eq!(
            SamplePolicy::for_count(301),
            SamplePolicy {
                max_dimension: 320,
                jpeg_quality: 30
            }
        );
    }

    #[tokio::test]
    async fn samples_one_frame_per_second_with_uniform_timestamps() {
        let decoder = FakeDecoder::new(12.0, 640, 360);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();

        assert_eq!(frames.len(), 12);
        for pair in frames.windows(2) {
            assert!(pair[1].timestamp_seconds > pair[0].timestamp_seconds);
            let step = pair[1].timestamp_seconds - pair[0].timestamp_seconds;
            assert!((step - 1.0).abs() < 1e-9);
        }
        assert_eq!(frames[0].timestamp_seconds, 0.0);
    }

    #[tokio::test]
    async fn short_video_frames_fit_512() {
        let decoder = FakeDecoder::new(3.0, 1920, 1080);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();

        assert_eq!(frames.len(), 3);
        for frame in &frames {
            let (w, h) = decoded_dimensions(frame);
            assert!(w.max(h) <= 512, "frame {}x{} exceeds 512 cap", w, h);
        }
    }

    #[tokio::test]
    async fn long_video_frames_fit_320() {
        let decoder = FakeDecoder::new(301.0, 1280, 720);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();

        assert_eq!(frames.len(), 301);
        for frame in frames.iter().step_by(50) {
            let (w, h) = decoded_dimensions(frame);
            assert!(w.max(h) <= 320, "frame {}x{} exceeds 320 cap", w, h);
        }
    }

    #[tokio::test]
    async fn small_frames_are_not_upscaled() {
        let decoder = FakeDecoder::new(2.0, 160, 90);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();
        let (w, h) = decoded_dimensions(&frames[0]);
        assert_eq!((w, h), (160, 90));
    }

    #[tokio::test]
    async fn seek_timeout_reuses_previous_frame() {
        let decoder = FakeDecoder::new(3.0, 320, 240).with_timeouts([1]);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();

        assert_eq!(frames.len(), 3);
        // Frame 1 reuses frame 0's pixels; frame 2 decoded fresh.
        assert_eq!(frames[1].image_data_uri, frames[0].image_data_uri);
        assert_ne!(frames[2].image_data_uri, frames[1].image_data_uri);
    }

    #[tokio::test]
    async fn timeout_before_first_decode_emits_blank_frame() {
        let decoder = FakeDecoder::new(2.0, 320, 240).with_timeouts([0]);
        let frames = sample_frames(&decoder, &PathBuf::from("test.mp4"))
            .await
            .unwrap();

        assert_eq!(frames.len(), 2);
        let (w, h) = decoded_dimensions(&frames[0]);
        assert_eq!((w, h), (16, 16));
    }
}

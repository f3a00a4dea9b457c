pub mod decoder;
pub mod normalize;
pub mod sample;

pub use decoder::{FfmpegDecoder, VideoDecoder};
pub use normalize::{encode_file, mime_for_path, validate_size};
pub use sample::{frame_count, sample_frames, SamplePolicy, SEEK_TIMEOUT};

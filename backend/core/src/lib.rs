pub mod error;
pub mod merge;
pub mod progress;
pub mod state;
pub mod types;

pub use error::ReelError;
pub use merge::{merge_analysis, merge_sop};
pub use progress::{read_percent, AnalysisProgress};
pub use state::{Category, DashboardState, SavedAnalysis, SopStep};
pub use types::{
    AnalysisResult, ProviderKind, SampledFrame, SopResult, VideoPayload, LONG_VIDEO_FRAME_THRESHOLD,
    MAX_SAMPLED_FRAMES, MAX_UPLOAD_BYTES,
};

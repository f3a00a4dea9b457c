pub mod caller;
pub mod extract;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod router;

pub use caller::{
    analyzer_for, FrameSamplingCaller, NativeMultimodalCaller, VideoAnalyzer, VideoSource,
};
pub use extract::{extract_json, parse_reply};
pub use router::{analyze_video, extract_url_content, generate_sop_script};
